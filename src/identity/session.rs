use std::sync::Arc;

use tracing::{debug, info, warn};

use super::role::Role;
use super::storage::{KeyValueStore, MemoryStore};

pub type SessionToken = String;

pub const TOKEN_KEY: &str = "access_token";
pub const ROLE_KEY: &str = "user_role";
pub const SUBJECT_KEY: &str = "user_id";

const KEYS: [&str; 3] = [TOKEN_KEY, ROLE_KEY, SUBJECT_KEY];

/// Local record of who is signed in. There is no partially authenticated state:
/// either all three parts are known or none are.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Unauthenticated,
    Authenticated {
        token: SessionToken,
        role: Role,
        subject_id: String,
    },
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            Session::Authenticated { token, .. } => Some(token.as_str()),
            Session::Unauthenticated => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            Session::Authenticated { role, .. } => Some(*role),
            Session::Unauthenticated => None,
        }
    }

    pub fn subject_id(&self) -> Option<&str> {
        match self {
            Session::Authenticated { subject_id, .. } => Some(subject_id.as_str()),
            Session::Unauthenticated => None,
        }
    }

    /// Decode the three persisted entries. Anything short of a complete, well-formed
    /// triple is treated as no session.
    fn from_entries(token: Option<String>, role: Option<String>, subject_id: Option<String>) -> Session {
        match (token, role, subject_id) {
            (Some(token), Some(role), Some(subject_id)) if !token.is_empty() && !subject_id.is_empty() => {
                match role.parse::<Role>() {
                    Ok(role) => Session::Authenticated { token, role, subject_id },
                    Err(e) => {
                        debug!(target: "session", "ignoring persisted session: {}", e);
                        Session::Unauthenticated
                    }
                }
            }
            (None, None, None) => Session::Unauthenticated,
            _ => {
                debug!(target: "session", "ignoring partial persisted session");
                Session::Unauthenticated
            }
        }
    }
}

/// Sole writer of the persisted session. Construct one per client and share it by `Arc`
/// between the navigator and the gateway.
///
/// Storage failures never escape: a failed read is reported as `Unauthenticated` and a
/// failed write is logged and dropped.
pub struct SessionStore {
    backend: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn save(&self, token: &str, role: Role, subject_id: &str) {
        let entries = [(TOKEN_KEY, token), (ROLE_KEY, role.as_str()), (SUBJECT_KEY, subject_id)];
        match self.backend.set_many(&entries) {
            Ok(()) => info!(target: "session", "session.save subject={} role={}", subject_id, role),
            Err(e) => warn!(target: "session", "session.save dropped, storage failed: {}", e),
        }
    }

    pub fn clear(&self) {
        match self.backend.remove_many(&KEYS) {
            Ok(()) => debug!(target: "session", "session.clear"),
            Err(e) => warn!(target: "session", "session.clear failed, storage left as is: {}", e),
        }
    }

    pub fn current(&self) -> Session {
        match self.backend.get_many(&KEYS) {
            Ok(mut vals) if vals.len() == KEYS.len() => {
                let subject_id = vals.pop().flatten();
                let role = vals.pop().flatten();
                let token = vals.pop().flatten();
                Session::from_entries(token, role, subject_id)
            }
            Ok(vals) => {
                warn!(target: "session", "storage returned {} values for {} keys", vals.len(), KEYS.len());
                Session::Unauthenticated
            }
            Err(e) => {
                warn!(target: "session", "session.current degraded to unauthenticated: {}", e);
                Session::Unauthenticated
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current().is_authenticated()
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::storage::StorageError;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get_many(&self, _keys: &[&str]) -> Result<Vec<Option<String>>, StorageError> {
            Err(StorageError::Unavailable("disabled".into()))
        }
        fn set_many(&self, _entries: &[(&str, &str)]) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("quota exceeded".into()))
        }
        fn remove_many(&self, _keys: &[&str]) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disabled".into()))
        }
    }

    #[test]
    fn save_then_current_round_trips() {
        let store = SessionStore::in_memory();
        store.save("tok-1", Role::User, "42");
        assert_eq!(
            store.current(),
            Session::Authenticated { token: "tok-1".into(), role: Role::User, subject_id: "42".into() }
        );
        assert!(store.is_authenticated());
    }

    #[test]
    fn clear_is_idempotent() {
        let store = SessionStore::in_memory();
        store.save("tok", Role::Admin, "1");
        store.clear();
        let once = store.current();
        store.clear();
        assert_eq!(store.current(), once);
        assert_eq!(once, Session::Unauthenticated);
    }

    #[test]
    fn save_replaces_previous_session() {
        let store = SessionStore::in_memory();
        store.save("old", Role::Admin, "1");
        store.save("new", Role::User, "2");
        assert_eq!(store.current().token(), Some("new"));
        assert_eq!(store.current().role(), Some(Role::User));
        assert_eq!(store.current().subject_id(), Some("2"));
    }

    #[test]
    fn partial_state_is_unauthenticated() {
        let backend = Arc::new(MemoryStore::new());
        backend.insert_raw(TOKEN_KEY, "tok");
        let store = SessionStore::new(backend.clone());
        assert_eq!(store.current(), Session::Unauthenticated);

        backend.insert_raw(SUBJECT_KEY, "7");
        assert!(!store.is_authenticated(), "token without role is not a session");

        backend.insert_raw(ROLE_KEY, "superuser");
        assert!(!store.is_authenticated(), "unknown role is not a session");

        backend.insert_raw(ROLE_KEY, "admin");
        assert!(store.is_authenticated());
    }

    #[test]
    fn empty_token_is_unauthenticated() {
        let backend = Arc::new(MemoryStore::new());
        backend.insert_raw(TOKEN_KEY, "");
        backend.insert_raw(ROLE_KEY, "user");
        backend.insert_raw(SUBJECT_KEY, "3");
        assert!(!SessionStore::new(backend).is_authenticated());
    }

    #[test]
    fn storage_failures_are_swallowed() {
        let store = SessionStore::new(Arc::new(BrokenStore));
        store.save("tok", Role::User, "1");
        store.clear();
        assert_eq!(store.current(), Session::Unauthenticated);
        assert!(!store.is_authenticated());
    }
}
