//! Route declarations and the access guard consulted before every navigation.

mod guard;
mod navigator;
mod policy;
mod table;

pub use guard::{AccessGuard, NavigationDecision, ADMIN_HOME, LOGIN_PATH, USER_HOME};
pub use navigator::{Landing, Navigator, MAX_REDIRECTS};
pub use policy::{AccessMode, RoutePolicy};
pub use table::{normalize, Route, RouteMatch, RouteTable, ViewId};
