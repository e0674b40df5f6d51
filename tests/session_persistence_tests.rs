use parkwise::config::ClientConfig;
use parkwise::identity::{Role, ROLE_KEY, SUBJECT_KEY, TOKEN_KEY};
use parkwise::ParkingClient;
use serde_json::Value;

fn config_in(dir: &tempfile::TempDir) -> ClientConfig {
    ClientConfig { session_file: dir.path().join("state").join("session.json"), ..ClientConfig::default() }
}

#[test]
fn session_survives_client_restart() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config_in(&dir);

    let first = ParkingClient::from_config(&cfg).unwrap();
    first.sessions().save("tok-9", Role::Admin, "9");
    drop(first);

    let second = ParkingClient::from_config(&cfg).unwrap();
    let session = second.sessions().current();
    assert_eq!(session.token(), Some("tok-9"));
    assert_eq!(session.role(), Some(Role::Admin));
    assert!(second.navigator().navigate("/admin/dashboard").is_proceed());
}

#[test]
fn persisted_file_uses_the_three_session_keys() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config_in(&dir);
    ParkingClient::from_config(&cfg).unwrap().sessions().save("tok", Role::User, "42");

    let text = std::fs::read_to_string(&cfg.session_file).unwrap();
    let stored: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(stored[TOKEN_KEY], "tok");
    assert_eq!(stored[ROLE_KEY], "user");
    assert_eq!(stored[SUBJECT_KEY], "42");
}

#[test]
fn logout_is_visible_to_the_next_process() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config_in(&dir);
    let client = ParkingClient::from_config(&cfg).unwrap();
    client.sessions().save("tok", Role::User, "42");
    assert_eq!(client.api().auth().logout().target(), Some("/login"));

    let again = ParkingClient::from_config(&cfg).unwrap();
    assert!(!again.sessions().is_authenticated());
    assert_eq!(again.navigator().navigate("/user/lots").target(), Some("/login"));
}

#[test]
fn tampered_file_reads_as_signed_out() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config_in(&dir);
    std::fs::create_dir_all(cfg.session_file.parent().unwrap()).unwrap();
    std::fs::write(&cfg.session_file, r#"{"access_token": "tok", "user_role": "root", "user_id": "1"}"#).unwrap();

    let client = ParkingClient::from_config(&cfg).unwrap();
    assert!(!client.sessions().is_authenticated());
    assert_eq!(client.navigator().settle("/admin/lots").unwrap().path, "/login");

    std::fs::write(&cfg.session_file, "not json at all").unwrap();
    assert!(!client.sessions().is_authenticated());
    client.sessions().save("fresh", Role::User, "5");
    assert!(client.sessions().is_authenticated());
}

#[test]
fn bad_api_url_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = ClientConfig { api_url: "::nope::".into(), ..config_in(&dir) };
    let err = ParkingClient::from_config(&cfg).err().expect("config error");
    assert_eq!(err.code_str(), "config");
}
