//! Client for the parking reservation service.
//!
//! The interesting part is the access-control layer shared by navigation and HTTP:
//! [`identity::SessionStore`] holds the signed-in subject, [`routing::AccessGuard`] decides
//! every navigation against it, and [`gateway::HttpGateway`] injects its token into each
//! request and drops it when the backend answers 401.

pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod identity;
pub mod routing;

pub use client::ParkingClient;
pub use error::{ApiError, ApiResult};
