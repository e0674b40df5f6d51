//! Declared routes of the parking app and path matching against them.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use super::guard::{ADMIN_HOME, LOGIN_PATH, USER_HOME};
use super::policy::RoutePolicy;
use crate::identity::Role;

/// Opaque identifier of the view a route renders. The router never looks inside it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewId(pub String);

impl Display for ViewId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for ViewId {
    fn from(s: &str) -> Self { ViewId(s.to_string()) }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pattern: String,
    view: ViewId,
    policy: RoutePolicy,
}

impl Route {
    pub fn pattern(&self) -> &str { &self.pattern }
    pub fn view(&self) -> &ViewId { &self.view }
    pub fn policy(&self) -> &RoutePolicy { &self.policy }

    /// Match a normalized path. `:name` segments capture one non-empty segment.
    fn matches(&self, path: &str) -> Option<BTreeMap<String, String>> {
        let want: Vec<&str> = segments(&self.pattern).collect();
        let got: Vec<&str> = segments(path).collect();
        if want.len() != got.len() {
            return None;
        }
        let mut params = BTreeMap::new();
        for (w, g) in want.iter().zip(got.iter()) {
            if let Some(name) = w.strip_prefix(':') {
                params.insert(name.to_string(), g.to_string());
            } else if w != g {
                return None;
            }
        }
        Some(params)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    pub route: &'a Route,
    pub params: BTreeMap<String, String>,
}

/// Ordered route list; the first matching declaration wins. Paths that match nothing
/// are sent to `fallback`.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
    fallback: String,
}

impl RouteTable {
    pub fn new<S: Into<String>>(fallback: S) -> Self {
        Self { routes: Vec::new(), fallback: fallback.into() }
    }

    pub fn route<P: Into<String>, V: Into<ViewId>>(mut self, pattern: P, view: V, policy: RoutePolicy) -> Self {
        self.routes.push(Route { pattern: normalize(&pattern.into()), view: view.into(), policy });
        self
    }

    /// Routes of the parking reservation client.
    pub fn parking() -> Self {
        RouteTable::new("/")
            .route("/", "Home", RoutePolicy::guest_only())
            .route(LOGIN_PATH, "Login", RoutePolicy::guest_only())
            .route("/register", "Register", RoutePolicy::guest_only())
            .route(USER_HOME, "UserDashboard", RoutePolicy::role(Role::User))
            .route("/user/lots", "ParkingLots", RoutePolicy::role(Role::User))
            .route("/user/reservations", "MyReservations", RoutePolicy::role(Role::User))
            .route("/user/profile", "Profile", RoutePolicy::role(Role::User))
            .route(ADMIN_HOME, "AdminDashboard", RoutePolicy::role(Role::Admin))
            .route("/admin/lots", "ManageLots", RoutePolicy::role(Role::Admin))
            .route("/admin/lots/:id", "LotDetails", RoutePolicy::role(Role::Admin))
    }

    pub fn fallback(&self) -> &str { &self.fallback }

    pub fn routes(&self) -> &[Route] { &self.routes }

    pub fn resolve(&self, path: &str) -> Option<RouteMatch<'_>> {
        let path = normalize(path);
        self.routes
            .iter()
            .find_map(|route| route.matches(&path).map(|params| RouteMatch { route, params }))
    }
}

/// Strip query and fragment, collapse duplicate and trailing slashes.
pub fn normalize(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or("");
    let joined = segments(path).collect::<Vec<_>>().join("/");
    format!("/{}", joined)
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}
