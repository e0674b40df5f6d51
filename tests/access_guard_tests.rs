use std::sync::Arc;

use parkwise::identity::{Role, Session, SessionStore};
use parkwise::routing::{
    AccessGuard, AccessMode, NavigationDecision, Navigator, RoutePolicy, RouteTable, ADMIN_HOME, LOGIN_PATH, USER_HOME,
};

fn sessions() -> Vec<Session> {
    vec![
        Session::Unauthenticated,
        Session::Authenticated { token: "t".into(), role: Role::User, subject_id: "42".into() },
        Session::Authenticated { token: "t".into(), role: Role::Admin, subject_id: "1".into() },
    ]
}

fn policies() -> Vec<RoutePolicy> {
    vec![
        RoutePolicy::public(),
        RoutePolicy::guest_only(),
        RoutePolicy::authenticated(),
        RoutePolicy::role(Role::User),
        RoutePolicy::role(Role::Admin),
    ]
}

#[test]
fn decisions_only_target_login_or_a_home() {
    let guard = AccessGuard::default();
    for policy in policies() {
        for session in sessions() {
            match guard.decide(&policy, &session) {
                NavigationDecision::Proceed => {}
                NavigationDecision::Redirect(to) => assert!(
                    [LOGIN_PATH, USER_HOME, ADMIN_HOME].contains(&to.as_str()),
                    "{:?} / {:?} redirected to {}",
                    policy,
                    session,
                    to
                ),
            }
        }
    }
}

#[test]
fn guest_is_never_let_into_protected_routes() {
    let guard = AccessGuard::default();
    for policy in policies() {
        let needs_auth = matches!(policy.access(), AccessMode::Authenticated);
        let decision = guard.decide(&policy, &Session::Unauthenticated);
        assert_eq!(decision.is_proceed(), !needs_auth, "{:?}", policy);
        if needs_auth {
            assert_eq!(decision.target(), Some(LOGIN_PATH));
        }
    }
}

#[test]
fn authenticated_subject_is_kept_off_guest_pages() {
    let guard = AccessGuard::default();
    let all = sessions();
    let (user, admin) = (&all[1], &all[2]);
    assert_eq!(guard.decide(&RoutePolicy::guest_only(), user), NavigationDecision::redirect(USER_HOME));
    assert_eq!(guard.decide(&RoutePolicy::guest_only(), admin), NavigationDecision::redirect(ADMIN_HOME));
}

#[test]
fn same_inputs_same_decision() {
    let guard = AccessGuard::default();
    for policy in policies() {
        for session in sessions() {
            assert_eq!(guard.decide(&policy, &session), guard.decide(&policy, &session));
        }
    }
}

#[test]
fn every_route_settles_for_every_session() {
    for session in sessions() {
        let store = Arc::new(SessionStore::in_memory());
        if let Session::Authenticated { token, role, subject_id } = &session {
            store.save(token, *role, subject_id);
        }
        let nav = Navigator::parking(store);
        for route in RouteTable::parking().routes() {
            let path = route.pattern().replace(":id", "9");
            let landing = nav.settle(&path).unwrap_or_else(|| panic!("{} did not settle for {:?}", path, session));
            assert!(nav.navigate(&landing.path).is_proceed(), "{} is not a resting place", landing.path);
        }
    }
}

#[test]
fn route_table_scenarios() {
    let store = Arc::new(SessionStore::in_memory());
    let nav = Navigator::parking(store.clone());

    assert_eq!(nav.navigate("/user/profile"), NavigationDecision::redirect(LOGIN_PATH));
    assert!(nav.navigate("/").is_proceed());
    assert!(nav.navigate("/register").is_proceed());

    store.save("t", Role::User, "42");
    assert_eq!(nav.navigate("/admin/dashboard"), NavigationDecision::redirect(USER_HOME));
    assert_eq!(nav.navigate("/admin/lots/3"), NavigationDecision::redirect(USER_HOME));
    assert!(nav.navigate("/user/profile?tab=history").is_proceed());

    store.save("t", Role::Admin, "1");
    assert_eq!(nav.navigate("/login"), NavigationDecision::redirect(ADMIN_HOME));
    assert!(nav.navigate("/admin/lots/3").is_proceed());
    assert_eq!(nav.navigate("/"), NavigationDecision::redirect(ADMIN_HOME));
}

#[test]
fn custom_homes_are_honoured() {
    let guard = AccessGuard::new("/signin", "/me", "/ops");
    let user = Session::Authenticated { token: "t".into(), role: Role::User, subject_id: "2".into() };
    assert_eq!(guard.decide(&RoutePolicy::authenticated(), &Session::Unauthenticated).target(), Some("/signin"));
    assert_eq!(guard.decide(&RoutePolicy::role(Role::Admin), &user).target(), Some("/me"));
    assert_eq!(guard.home_for(Role::Admin), "/ops");
}
