use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, warn};

use super::guard::{AccessGuard, NavigationDecision};
use super::table::{normalize, RouteTable, ViewId};
use crate::identity::{Session, SessionStore};

/// Upper bound on redirects followed by [`Navigator::settle`].
pub const MAX_REDIRECTS: usize = 8;

/// Where a navigation finally lands after redirects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Landing {
    pub path: String,
    pub view: ViewId,
    pub params: BTreeMap<String, String>,
}

/// Navigation boundary: resolves a path against the route table and asks the guard
/// whether the current session may enter it.
pub struct Navigator {
    table: RouteTable,
    guard: AccessGuard,
    sessions: Arc<SessionStore>,
}

impl Navigator {
    pub fn new(table: RouteTable, guard: AccessGuard, sessions: Arc<SessionStore>) -> Self {
        Self { table, guard, sessions }
    }

    pub fn parking(sessions: Arc<SessionStore>) -> Self {
        Self::new(RouteTable::parking(), AccessGuard::default(), sessions)
    }

    pub fn guard(&self) -> &AccessGuard { &self.guard }

    /// One navigation attempt, one decision.
    pub fn navigate(&self, path: &str) -> NavigationDecision {
        self.decide_with(path, &self.sessions.current())
    }

    fn decide_with(&self, path: &str, session: &Session) -> NavigationDecision {
        match self.table.resolve(path) {
            Some(m) => self.guard.decide(m.route.policy(), session),
            None => {
                debug!(target: "navigator", "no route for {}, falling back to {}", path, self.table.fallback());
                NavigationDecision::redirect(self.table.fallback())
            }
        }
    }

    /// Follow redirects until a route proceeds. The session is read once, so every hop is
    /// judged against the same state. Returns `None` only when neither the chain nor the
    /// login route settles.
    pub fn settle(&self, path: &str) -> Option<Landing> {
        let session = self.sessions.current();
        let mut current = normalize(path);
        for _ in 0..=MAX_REDIRECTS {
            match self.decide_with(&current, &session) {
                NavigationDecision::Proceed => return self.landing(&current),
                NavigationDecision::Redirect(next) => current = normalize(&next),
            }
        }
        warn!(target: "navigator", "redirect limit reached from {}, landing on {}", path, self.guard.login_path());
        self.landing(self.guard.login_path())
    }

    fn landing(&self, path: &str) -> Option<Landing> {
        let m = self.table.resolve(path)?;
        Some(Landing { path: normalize(path), view: m.route.view().clone(), params: m.params })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Role;
    use crate::routing::policy::RoutePolicy;

    fn nav() -> (Navigator, Arc<SessionStore>) {
        let sessions = Arc::new(SessionStore::in_memory());
        (Navigator::parking(sessions.clone()), sessions)
    }

    #[test]
    fn unknown_path_redirects_to_fallback() {
        let (n, _) = nav();
        assert_eq!(n.navigate("/does/not/exist"), NavigationDecision::redirect("/"));
    }

    #[test]
    fn guest_settles_on_login_for_protected_pages() {
        let (n, _) = nav();
        let landing = n.settle("/user/profile").unwrap();
        assert_eq!(landing.path, "/login");
        assert_eq!(landing.view.0, "Login");
    }

    #[test]
    fn unknown_path_settles_home_for_guest_and_dashboard_for_user() {
        let (n, s) = nav();
        assert_eq!(n.settle("/missing").unwrap().view.0, "Home");
        s.save("tok", Role::User, "42");
        assert_eq!(n.settle("/missing").unwrap().path, "/user/dashboard");
    }

    #[test]
    fn admin_lands_on_lot_details_with_params() {
        let (n, s) = nav();
        s.save("tok", Role::Admin, "1");
        let landing = n.settle("/admin/lots/9").unwrap();
        assert_eq!(landing.view.0, "LotDetails");
        assert_eq!(landing.params.get("id").map(String::as_str), Some("9"));
    }

    #[test]
    fn redirect_loop_is_bounded() {
        let sessions = Arc::new(SessionStore::in_memory());
        // Fallback points at a path that is itself unknown.
        let table = RouteTable::new("/gone").route("/login", "Login", RoutePolicy::public());
        let n = Navigator::new(table, AccessGuard::default(), sessions);
        let landing = n.settle("/anywhere").unwrap();
        assert_eq!(landing.view.0, "Login");

        let empty = Navigator::new(RouteTable::new("/gone"), AccessGuard::default(), Arc::new(SessionStore::in_memory()));
        assert!(empty.settle("/anywhere").is_none());
    }
}
