//! Tests for configuration loading.

mod env_support;

use spotcred::config::{CredentialsConfig, DEFAULT_TOKEN_URL};
use spotcred::error::CredentialsError;

use env_support::SpotifyEnv;

#[test]
fn config_builder_overrides_token_url() {
    let config = CredentialsConfig::new("cid", "secret").with_token_url("http://localhost:9999/token");
    assert_eq!(config.client_id(), "cid");
    assert_eq!(config.client_secret(), "secret");
    assert_eq!(config.token_url(), "http://localhost:9999/token");
}

#[test]
fn config_from_env_reads_client_identity() {
    let env = SpotifyEnv::cleared();
    env.set("SPOTIFY_CLIENT_ID", "env-id")
        .set("SPOTIFY_CLIENT_SECRET", "env-secret");

    let config = CredentialsConfig::from_env().expect("config from env");

    assert_eq!(config.client_id(), "env-id");
    assert_eq!(config.client_secret(), "env-secret");
    assert_eq!(config.token_url(), DEFAULT_TOKEN_URL);
}

#[test]
fn config_from_env_applies_token_url_override() {
    let env = SpotifyEnv::cleared();
    env.set("SPOTIFY_CLIENT_ID", "env-id")
        .set("SPOTIFY_CLIENT_SECRET", "env-secret")
        .set("SPOTIFY_TOKEN_URL", "http://localhost:8080/api/token");

    let config = CredentialsConfig::from_env().expect("config from env");

    assert_eq!(config.token_url(), "http://localhost:8080/api/token");
}

#[test]
fn config_from_env_ignores_blank_token_url() {
    let env = SpotifyEnv::cleared();
    env.set("SPOTIFY_CLIENT_ID", "env-id")
        .set("SPOTIFY_CLIENT_SECRET", "env-secret")
        .set("SPOTIFY_TOKEN_URL", "   ");

    let config = CredentialsConfig::from_env().expect("config from env");

    assert_eq!(config.token_url(), DEFAULT_TOKEN_URL);
}

#[test]
fn config_from_env_requires_client_secret() {
    let env = SpotifyEnv::cleared();
    env.set("SPOTIFY_CLIENT_ID", "env-id");

    let err = CredentialsConfig::from_env().expect_err("missing secret");

    match err {
        CredentialsError::Configuration(msg) => assert!(msg.contains("SPOTIFY_CLIENT_SECRET")),
        other => panic!("expected Configuration, got {other:?}"),
    }
}
