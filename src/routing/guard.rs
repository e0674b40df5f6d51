use tracing::debug;

use super::policy::{AccessMode, RoutePolicy};
use crate::identity::{Role, Session};

pub const LOGIN_PATH: &str = "/login";
pub const USER_HOME: &str = "/user/dashboard";
pub const ADMIN_HOME: &str = "/admin/dashboard";

/// Outcome of one navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationDecision {
    Proceed,
    Redirect(String),
}

impl NavigationDecision {
    pub fn redirect<S: Into<String>>(path: S) -> Self { NavigationDecision::Redirect(path.into()) }

    pub fn is_proceed(&self) -> bool { matches!(self, NavigationDecision::Proceed) }

    pub fn target(&self) -> Option<&str> {
        match self {
            NavigationDecision::Redirect(p) => Some(p.as_str()),
            NavigationDecision::Proceed => None,
        }
    }
}

/// Maps a route policy and the current session to a navigation decision.
///
/// Holds no state between calls and does no I/O; the session is handed in by the
/// caller. The outcome is advisory: the backend still checks every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGuard {
    login_path: String,
    user_home: String,
    admin_home: String,
}

impl Default for AccessGuard {
    fn default() -> Self { Self::new(LOGIN_PATH, USER_HOME, ADMIN_HOME) }
}

impl AccessGuard {
    pub fn new<S: Into<String>>(login_path: S, user_home: S, admin_home: S) -> Self {
        Self { login_path: login_path.into(), user_home: user_home.into(), admin_home: admin_home.into() }
    }

    pub fn login_path(&self) -> &str { &self.login_path }

    pub fn home_for(&self, role: Role) -> &str {
        match role {
            Role::Admin => &self.admin_home,
            Role::User => &self.user_home,
        }
    }

    pub fn decide(&self, policy: &RoutePolicy, session: &Session) -> NavigationDecision {
        let decision = match (policy.access(), session) {
            // Checked first so a guest-only route never reaches the role check.
            (AccessMode::GuestOnly, Session::Authenticated { role, .. }) => {
                NavigationDecision::redirect(self.home_for(*role))
            }
            (AccessMode::Authenticated, Session::Unauthenticated) => {
                NavigationDecision::redirect(self.login_path.as_str())
            }
            // Wrong area for a valid subject: send them home, not to login.
            (AccessMode::Authenticated, Session::Authenticated { role, .. })
                if policy.required_role().is_some_and(|required| required != *role) =>
            {
                NavigationDecision::redirect(self.home_for(*role))
            }
            _ => NavigationDecision::Proceed,
        };
        debug!(target: "guard", "policy={:?} role={:?} -> {:?}", policy, session.role(), decision);
        decision
    }
}
