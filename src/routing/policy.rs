use crate::identity::Role;

/// Who a route is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessMode {
    /// Anyone, signed in or not.
    Public,
    /// Only visitors without a session (login, registration). Signed-in subjects are
    /// sent to their home instead.
    GuestOnly,
    /// Requires a session, optionally of a specific role.
    Authenticated,
}

/// Access requirement attached to a declared route.
///
/// Fields are private so a required role can only be set through [`RoutePolicy::role`],
/// which also makes the route authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoutePolicy {
    access: AccessMode,
    required_role: Option<Role>,
}

impl RoutePolicy {
    pub const fn public() -> Self {
        Self { access: AccessMode::Public, required_role: None }
    }

    pub const fn guest_only() -> Self {
        Self { access: AccessMode::GuestOnly, required_role: None }
    }

    pub const fn authenticated() -> Self {
        Self { access: AccessMode::Authenticated, required_role: None }
    }

    pub const fn role(role: Role) -> Self {
        Self { access: AccessMode::Authenticated, required_role: Some(role) }
    }

    pub fn access(&self) -> AccessMode { self.access }

    pub fn required_role(&self) -> Option<Role> { self.required_role }
}

impl Default for RoutePolicy {
    fn default() -> Self { Self::public() }
}
