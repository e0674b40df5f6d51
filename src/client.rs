use std::sync::Arc;

use crate::api::ParkingApi;
use crate::config::ClientConfig;
use crate::error::ApiResult;
use crate::gateway::HttpGateway;
use crate::identity::{FileStore, KeyValueStore, SessionStore};
use crate::routing::Navigator;

/// Session store, navigator and REST client wired to one shared session.
pub struct ParkingClient {
    sessions: Arc<SessionStore>,
    navigator: Navigator,
    api: ParkingApi,
}

impl ParkingClient {
    /// Persist the session in the configured file and talk to the configured backend.
    pub fn from_config(cfg: &ClientConfig) -> ApiResult<Self> {
        Self::with_backend(cfg, Arc::new(FileStore::new(&cfg.session_file)))
    }

    pub fn with_backend(cfg: &ClientConfig, backend: Arc<dyn KeyValueStore>) -> ApiResult<Self> {
        let sessions = Arc::new(SessionStore::new(backend));
        let gateway = HttpGateway::from_config(cfg, sessions.clone())?;
        Ok(Self { navigator: Navigator::parking(sessions.clone()), api: ParkingApi::new(gateway), sessions })
    }

    pub fn sessions(&self) -> &Arc<SessionStore> { &self.sessions }

    pub fn navigator(&self) -> &Navigator { &self.navigator }

    pub fn api(&self) -> &ParkingApi { &self.api }
}
