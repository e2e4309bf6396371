//! Tests for credential loading, prompting and persistence.

use crate::support::*;

#[test]
fn test_missing_credentials_are_prompted_and_saved() {
    let t = Test::new();
    t.write_config(APP_UUID);
    let mock = CloudMock::new();
    mock.full_run(standard_environments());

    let output = t.generate(&mock, &format!("{}\n{}\n", GOOD_KEY, GOOD_SECRET));
    assert_success(&output);
    assert_stdout_contains(&output, "Credentials were written to");

    let raw = std::fs::read_to_string(t.credentials_path()).unwrap();
    let saved: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(saved["key"], GOOD_KEY);
    assert_eq!(saved["secret"], GOOD_SECRET);
    assert!(t.alias_path(SITE).exists());
}

#[cfg(unix)]
#[test]
fn test_saved_credentials_are_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let t = Test::new();
    t.write_config(APP_UUID);
    let mock = CloudMock::new();
    mock.full_run(standard_environments());

    let output = t.generate(&mock, &format!("{}\n{}\n", GOOD_KEY, GOOD_SECRET));
    assert_success(&output);

    let mode = std::fs::metadata(t.credentials_path())
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn test_rejected_credentials_give_up_after_three_attempts() {
    let t = Test::new();
    t.write_config(APP_UUID);
    let mock = CloudMock::new();
    mock.refuses_token(3);

    let output = t.generate(&mock, "k1\ns1\nk2\ns2\nk3\ns3\n");
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to authenticate with Acquia Cloud API");
    assert_stderr_contains(&output, "The client credentials are invalid");
    assert_stderr_contains(&output, "gave up after 3 failed authentication attempts");
    assert!(!t.credentials_path().exists());
}

#[test]
fn test_auth_attempts_is_configurable() {
    let t = Test::new();
    std::fs::write(
        t.config_path(),
        format!("[cloud]\napp_id = \"{}\"\nauth_attempts = 1\n", APP_UUID),
    )
    .unwrap();
    let mock = CloudMock::new();
    mock.refuses_token(1);

    let output = t.generate(&mock, "k1\ns1\nk2\ns2\n");
    assert_failure(&output);
    assert_stderr_contains(&output, "gave up after 1 failed authentication attempts");
}

#[test]
fn test_malformed_credential_file_is_fatal() {
    let t = Test::new();
    t.write_config(APP_UUID);
    std::fs::create_dir_all(t.credentials_path().parent().unwrap()).unwrap();
    std::fs::write(t.credentials_path(), "not json at all").unwrap();
    let mock = CloudMock::new();

    let output = t.generate(&mock, &format!("{}\n{}\n", GOOD_KEY, GOOD_SECRET));
    assert_failure(&output);
    assert_stderr_contains(&output, "malformed credentials");
    assert_stderr_contains(&output, "delete");

    let raw = std::fs::read_to_string(t.credentials_path()).unwrap();
    assert_eq!(raw, "not json at all");
}

#[test]
fn test_closed_input_stops_prompting() {
    let t = Test::new();
    t.write_config(APP_UUID);
    let mock = CloudMock::new();

    let output = t.generate(&mock, "");
    assert_failure(&output);
    assert_stderr_contains(&output, "input closed");
}

#[test]
fn test_unreachable_api_is_not_retried() {
    let t = Test::new();
    t.write_config(APP_UUID);

    let output = t
        .cmd()
        .env("BLT_CLOUD_TOKEN_URL", "http://127.0.0.1:9/oauth/token")
        .env("BLT_CLOUD_API_URL", "http://127.0.0.1:9/api")
        .arg("generate:aliases:acquia")
        .write_stdin("k1\ns1\nk2\ns2\n")
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "could not reach Acquia Cloud");
}

#[test]
fn test_token_service_failure_is_not_retried() {
    let t = Test::new();
    t.write_config(APP_UUID);
    let mock = CloudMock::new();
    mock.token_service_fails(1);

    let output = t.generate(&mock, "k1\ns1\nk2\ns2\n");
    assert_failure(&output);
    assert_stderr_contains(&output, "Acquia Cloud failed to authenticate (503");
    assert!(!t.credentials_path().exists());
}

#[test]
fn test_secret_is_saved_as_typed() {
    let t = Test::new();
    t.write_config(APP_UUID);
    let mock = CloudMock::new();
    mock.full_run(standard_environments());

    let output = t.generate(&mock, &format!("{}\n  padded secret \n", GOOD_KEY));
    assert_success(&output);

    let raw = std::fs::read_to_string(t.credentials_path()).unwrap();
    let saved: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(saved["secret"], "  padded secret ");
}
