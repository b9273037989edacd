//! Tests for the runner protocol fallbacks.

use crate::support::*;

#[tokio::test(flavor = "multi_thread")]
async fn test_legacy_commands_without_runner_files() {
    let vault = MockVault::start().await;
    vault.secret("api-key", "sk-test-12345").await;
    let t = Test::new();

    let output = t
        .fetch_cmd(&vault.url())
        .env_remove("GITHUB_ENV")
        .env_remove("GITHUB_OUTPUT")
        .env("INPUT_SECRETS", "api-key=API_KEY")
        .output()
        .unwrap();
    assert_success(&output);

    let out = stdout(&output);
    let mask = out.find("::add-mask::sk-test-12345").expect("value not masked");
    let set_env = out
        .find("::set-env name=API_KEY::sk-test-12345")
        .expect("variable not set");
    assert!(mask < set_env, "value must be masked before it is exported");
    assert_stdout_contains(&output, "::set-output name=API_KEY::sk-test-12345");
    assert!(!t.env_file().exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_multiline_value_round_trips_through_env_file() {
    let vault = MockVault::start().await;
    vault
        .secret("cert", "-----BEGIN-----\nabc\n-----END-----")
        .await;
    let t = Test::new();

    let output = t.fetch_secrets(&vault.url(), "cert=CERT");
    assert_success(&output);

    assert_eq!(
        t.exported(),
        vec![(
            "CERT".to_string(),
            "-----BEGIN-----\nabc\n-----END-----".to_string()
        )]
    );
    assert_stdout_contains(&output, "::add-mask::-----BEGIN-----%0Aabc%0A-----END-----");
}
