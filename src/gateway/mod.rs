//!
//! HTTP gateway
//! ------------
//! Every call to the backend goes through [`HttpGateway`], which runs two stages around
//! the network round trip:
//!
//! - outbound: attach the stored token as a bearer credential when there is one;
//! - inbound: on 401 clear the local session, then hand the failure back unchanged.
//!
//! The gateway never retries and never navigates. Sending the subject to the login page
//! is left to the access guard on the next navigation attempt.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::identity::SessionStore;

#[derive(Clone)]
pub struct HttpGateway {
    base: String,
    client: reqwest::Client,
    sessions: Arc<SessionStore>,
}

impl HttpGateway {
    pub fn new(base: &str, sessions: Arc<SessionStore>) -> ApiResult<Self> {
        Self::with_client(base, reqwest::Client::new(), sessions)
    }

    pub fn with_client(base: &str, client: reqwest::Client, sessions: Arc<SessionStore>) -> ApiResult<Self> {
        let parsed = Url::parse(base).map_err(|e| ApiError::Config(format!("invalid base URL '{}': {}", base, e)))?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::Config(format!("base URL '{}' cannot carry paths", base)));
        }
        Ok(Self { base: base.trim_end_matches('/').to_string(), client, sessions })
    }

    pub fn from_config(cfg: &ClientConfig, sessions: Arc<SessionStore>) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.http_timeout_secs))
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build http client: {}", e)))?;
        Self::with_client(&cfg.api_url, client, sessions)
    }

    pub fn base_url(&self) -> &str { &self.base }

    pub fn sessions(&self) -> &Arc<SessionStore> { &self.sessions }

    /// Join an endpoint path onto the base. Concatenation rather than `Url::join` so a
    /// base like `http://host/api` keeps its `/api` prefix.
    pub fn url(&self, path: &str) -> ApiResult<Url> {
        let full = format!("{}/{}", self.base, path.trim_start_matches('/'));
        Url::parse(&full).map_err(|e| ApiError::Config(format!("invalid endpoint URL '{}': {}", full, e)))
    }

    fn outbound(&self, rb: RequestBuilder) -> RequestBuilder {
        match self.sessions.current().token() {
            Some(token) => rb.bearer_auth(token),
            None => rb,
        }
    }

    async fn inbound(&self, resp: Response) -> ApiResult<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        if status == StatusCode::UNAUTHORIZED {
            // Cleanup before anything else can fail.
            self.sessions.clear();
            warn!(target: "gateway", "{} returned 401, local session cleared", resp.url().path());
        }
        let body: Value = resp.json().await.unwrap_or(Value::Null);
        Err(ApiError::from_status(status.as_u16(), &body))
    }

    /// Send a request through both stages and return the raw successful response.
    pub async fn send<B: Serialize + ?Sized>(&self, method: Method, path: &str, body: Option<&B>) -> ApiResult<Response> {
        let url = self.url(path)?;
        debug!(target: "gateway", "{} {}", method, url);
        let mut rb = self.client.request(method, url);
        if let Some(b) = body {
            rb = rb.json(b);
        }
        let resp = self.outbound(rb).send().await.map_err(ApiError::Transport)?;
        self.inbound(resp).await
    }

    async fn call<B: Serialize + ?Sized, T: DeserializeOwned>(&self, method: Method, path: &str, body: Option<&B>) -> ApiResult<T> {
        let resp = self.send(method, path, body).await?;
        resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.call::<Value, T>(Method::GET, path, None).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<T> {
        self.call(Method::POST, path, Some(body)).await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<T> {
        self.call(Method::PUT, path, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.call::<Value, T>(Method::DELETE, path, None).await
    }

    /// GET a binary body (export downloads).
    pub async fn get_bytes(&self, path: &str) -> ApiResult<Vec<u8>> {
        let resp = self.send::<Value>(Method::GET, path, None).await?;
        let bytes = resp.bytes().await.map_err(ApiError::Transport)?;
        Ok(bytes.to_vec())
    }
}

impl std::fmt::Debug for HttpGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGateway").field("base", &self.base).finish_non_exhaustive()
    }
}
