//! Client identity and token endpoint configuration.
//!
//! Resolution order: explicit values in code, then environment variables
//! (optionally seeded from a `.env` file).

use std::fmt;

use crate::error::{CredentialsError, Result};

/// Spotify accounts service token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

const CLIENT_ID_ENV: &str = "SPOTIFY_CLIENT_ID";
const CLIENT_SECRET_ENV: &str = "SPOTIFY_CLIENT_SECRET";
const TOKEN_URL_ENV: &str = "SPOTIFY_TOKEN_URL";

/// Everything a credential record needs to talk to the token endpoint.
///
/// # Example
/// ```no_run
/// use spotcred::config::CredentialsConfig;
///
/// let config = CredentialsConfig::new("client-id", "client-secret")
///     .with_token_url("http://localhost:8080/api/token");
/// assert_eq!(config.client_id(), "client-id");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialsConfig {
    client_id: String,
    client_secret: String,
    token_url: String,
}

impl fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"..")
            .field("token_url", &self.token_url)
            .finish()
    }
}

impl CredentialsConfig {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
        }
    }

    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    /// Load from `SPOTIFY_CLIENT_ID`, `SPOTIFY_CLIENT_SECRET` and the optional
    /// `SPOTIFY_TOKEN_URL`.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error

        let client_id = required_env(CLIENT_ID_ENV)?;
        let client_secret = required_env(CLIENT_SECRET_ENV)?;
        let config = Self::new(client_id, client_secret);

        Ok(match non_empty_env(TOKEN_URL_ENV) {
            Some(url) => config.with_token_url(url),
            None => config,
        })
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub fn token_url(&self) -> &str {
        &self.token_url
    }
}

fn required_env(key: &str) -> Result<String> {
    non_empty_env(key)
        .ok_or_else(|| CredentialsError::Configuration(format!("{key} is not set")))
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
