//! Unified client error model.
//! Every failure a backend call can produce is folded into `ApiError`, with helpers
//! mapping back to the HTTP status that produced it and to a message fit for display.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// 400: the backend rejected the request payload.
    #[error("{code}: {message}")]
    UserInput { code: String, message: String },
    /// 401: credential invalid or expired. The local session has already been cleared
    /// by the gateway when this reaches a caller.
    #[error("{code}: {message}")]
    Auth { code: String, message: String },
    /// 403: authenticated but not allowed.
    #[error("{code}: {message}")]
    Forbidden { code: String, message: String },
    #[error("{code}: {message}")]
    NotFound { code: String, message: String },
    #[error("{code}: {message}")]
    Conflict { code: String, message: String },
    /// Any other non-success status.
    #[error("{code}: {message} (HTTP {status})")]
    Server { status: u16, code: String, message: String },
    /// No response at all (connect refused, timeout, TLS).
    #[error("transport: {0}")]
    Transport(#[source] reqwest::Error),
    /// Response arrived but its body did not have the expected shape.
    #[error("decode: {0}")]
    Decode(String),
    #[error("config: {0}")]
    Config(String),
}

const FALLBACK_MESSAGE: &str = "An error occurred";

impl ApiError {
    /// Build the error for a non-success response. The backend reports failures as
    /// `{"msg": "..."}`; some handlers use `message` instead. The status is kept in the
    /// variant, never in the message.
    pub fn from_status(status: u16, body: &Value) -> Self {
        let message = body_message(body).unwrap_or_else(|| FALLBACK_MESSAGE.to_string());
        match status {
            400 => ApiError::UserInput { code: "bad_request".into(), message },
            401 => ApiError::Auth { code: "unauthorized".into(), message },
            403 => ApiError::Forbidden { code: "forbidden".into(), message },
            404 => ApiError::NotFound { code: "not_found".into(), message },
            409 => ApiError::Conflict { code: "conflict".into(), message },
            _ => ApiError::Server { status, code: "server_error".into(), message },
        }
    }

    pub fn code_str(&self) -> &str {
        match self {
            ApiError::UserInput { code, .. }
            | ApiError::Auth { code, .. }
            | ApiError::Forbidden { code, .. }
            | ApiError::NotFound { code, .. }
            | ApiError::Conflict { code, .. }
            | ApiError::Server { code, .. } => code.as_str(),
            ApiError::Transport(_) => "transport",
            ApiError::Decode(_) => "decode",
            ApiError::Config(_) => "config",
        }
    }

    /// Status of the response that produced this error, if there was one.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            ApiError::UserInput { .. } => Some(400),
            ApiError::Auth { .. } => Some(401),
            ApiError::Forbidden { .. } => Some(403),
            ApiError::NotFound { .. } => Some(404),
            ApiError::Conflict { .. } => Some(409),
            ApiError::Server { status, .. } => Some(*status),
            ApiError::Transport(_) | ApiError::Decode(_) | ApiError::Config(_) => None,
        }
    }

    pub fn is_auth_failure(&self) -> bool { matches!(self, ApiError::Auth { .. }) }

    /// Text to show a person: the backend's own message when there was a response,
    /// a connectivity hint when there was none.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::UserInput { message, .. }
            | ApiError::Auth { message, .. }
            | ApiError::Forbidden { message, .. }
            | ApiError::NotFound { message, .. }
            | ApiError::Conflict { message, .. }
            | ApiError::Server { message, .. } => {
                if message.is_empty() { FALLBACK_MESSAGE.to_string() } else { message.clone() }
            }
            ApiError::Transport(_) => "No response from server. Please check your connection.".to_string(),
            ApiError::Decode(_) | ApiError::Config(_) => "An unexpected error occurred".to_string(),
        }
    }
}

fn body_message(body: &Value) -> Option<String> {
    body.get("msg")
        .or_else(|| body.get("message"))
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

pub type ApiResult<T> = Result<T, ApiError>;
