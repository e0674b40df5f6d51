use tracing::{info, warn};

use super::dto::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::error::{ApiError, ApiResult};
use crate::gateway::HttpGateway;
use crate::identity::Session;
use crate::routing::{NavigationDecision, LOGIN_PATH};

/// Result of a registration call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// Account created; the subject still has to log in.
    Created { user_id: String },
    /// Account created and the response carried a full session, which has been saved.
    SignedIn(Session),
}

pub struct AuthApi<'a> {
    gateway: &'a HttpGateway,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(gateway: &'a HttpGateway) -> Self { Self { gateway } }

    /// Log in and persist the returned session. A rejected login surfaces as
    /// `ApiError::Auth`; the store is left cleared in that case. A success response without
    /// a usable token is `ApiError::Decode` and saves nothing.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<Session> {
        let resp: LoginResponse = self.gateway.post("/auth/login", &LoginRequest { username, password }).await?;
        let subject_id = resp.user_id.to_string();
        if resp.access_token.is_empty() || subject_id.is_empty() {
            warn!(target: "auth", "auth.login user={} response lacked a token or subject, nothing saved", username);
            return Err(ApiError::Decode("login response carried an empty access_token or user_id".into()));
        }
        self.gateway.sessions().save(&resp.access_token, resp.role, &subject_id);
        info!(target: "auth", "auth.login user={} subject={} role={}", username, subject_id, resp.role);
        Ok(self.gateway.sessions().current())
    }

    pub async fn register(&self, username: &str, password: &str, email: Option<&str>) -> ApiResult<Registration> {
        let resp: RegisterResponse =
            self.gateway.post("/auth/register", &RegisterRequest { username, password, email }).await?;
        let user_id = resp.user_id.to_string();
        info!(target: "auth", "auth.register user={} subject={}", username, user_id);
        match (resp.access_token, resp.role) {
            (Some(token), Some(role)) if !token.is_empty() => {
                self.gateway.sessions().save(&token, role, &user_id);
                Ok(Registration::SignedIn(self.gateway.sessions().current()))
            }
            _ => Ok(Registration::Created { user_id }),
        }
    }

    /// Drop the local session. The returned redirect is an explicit hard redirect for the
    /// caller to perform immediately, separate from the guard's own redirects.
    pub fn logout(&self) -> NavigationDecision {
        self.gateway.sessions().clear();
        info!(target: "auth", "auth.logout");
        NavigationDecision::redirect(LOGIN_PATH)
    }
}
