//! Client-side identity: who is signed in, and where that fact is persisted.
//! Keep the public surface thin and split implementation across sub-modules.

mod role;
mod session;
pub mod storage;

pub use role::{Role, UnknownRole};
pub use session::{Session, SessionStore, SessionToken, ROLE_KEY, SUBJECT_KEY, TOKEN_KEY};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
