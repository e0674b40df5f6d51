//! Typed calls to the parking backend. Every call is routed through the
//! [`HttpGateway`](crate::gateway::HttpGateway), so token injection and 401 handling apply
//! uniformly.

mod admin;
mod auth;
pub mod dto;
mod user;

pub use admin::AdminApi;
pub use auth::{AuthApi, Registration};
pub use user::UserApi;

use crate::error::ApiResult;
use crate::gateway::HttpGateway;
use dto::Message;

pub struct ParkingApi {
    gateway: HttpGateway,
}

impl ParkingApi {
    pub fn new(gateway: HttpGateway) -> Self { Self { gateway } }

    pub fn gateway(&self) -> &HttpGateway { &self.gateway }

    pub fn auth(&self) -> AuthApi<'_> { AuthApi::new(&self.gateway) }

    pub fn user(&self) -> UserApi<'_> { UserApi::new(&self.gateway) }

    pub fn admin(&self) -> AdminApi<'_> { AdminApi::new(&self.gateway) }

    /// Ask the backend to drop its response caches.
    pub async fn clear_cache(&self) -> ApiResult<Message> {
        self.gateway.post("/cache/clear", &serde_json::json!({})).await
    }
}
