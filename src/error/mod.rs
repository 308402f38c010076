//! Error types for spotcred.

use serde_json::Value;
use thiserror::Error;

/// Primary error type for all credential operations.
#[derive(Error, Debug)]
pub enum CredentialsError {
    #[error(transparent)]
    Authentication(#[from] AuthenticationError),

    #[error("Invalid token payload: {0}")]
    Validation(String),

    #[error("Unexpected token endpoint response: {0}")]
    Protocol(String),

    #[error("No refresh token held; cannot refresh user credentials")]
    MissingRefreshToken,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CredentialsError {
    /// Whether the token endpoint rejected the grant.
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }

    /// The endpoint's rejection, if this is one.
    pub fn as_authentication(&self) -> Option<&AuthenticationError> {
        match self {
            Self::Authentication(err) => Some(err),
            _ => None,
        }
    }
}

/// The token endpoint answered with a body carrying an `error` field.
///
/// Holds the HTTP status and the parsed body exactly as received. The status
/// is informational only: a 200 with an `error` body is still a failure.
#[derive(Error, Debug, Clone)]
#[error("Authentication failed (status {status}): {}", summarize(.body))]
pub struct AuthenticationError {
    pub status: u16,
    pub body: Value,
}

impl AuthenticationError {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// OAuth error code, e.g. `invalid_grant`.
    pub fn error(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }

    /// Human-readable description, when the server sent one.
    pub fn error_description(&self) -> Option<&str> {
        self.body.get("error_description").and_then(Value::as_str)
    }
}

fn summarize(body: &Value) -> String {
    let code = match body.get("error") {
        Some(Value::String(code)) => code.clone(),
        Some(other) => other.to_string(),
        None => "unknown".to_string(),
    };
    match body.get("error_description").and_then(Value::as_str) {
        Some(description) => format!("{code}: {description}"),
        None => code,
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, CredentialsError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn display_includes_code_and_description() {
        let err = AuthenticationError::new(
            400,
            json!({"error": "invalid_client", "error_description": "bad secret"}),
        );
        assert_eq!(
            err.to_string(),
            "Authentication failed (status 400): invalid_client: bad secret"
        );
    }

    #[test]
    fn display_without_description_shows_code_only() {
        let err = AuthenticationError::new(200, json!({"error": "invalid_grant"}));
        assert_eq!(
            err.to_string(),
            "Authentication failed (status 200): invalid_grant"
        );
    }

    #[test]
    fn non_string_error_values_are_rendered_as_json() {
        let err = AuthenticationError::new(401, json!({"error": {"status": 401}}));
        assert_eq!(err.error(), None);
        assert!(err.to_string().contains(r#"{"status":401}"#));
    }

    #[test]
    fn credentials_error_exposes_authentication_details() {
        let err: CredentialsError =
            AuthenticationError::new(400, json!({"error": "invalid_grant"})).into();
        assert!(err.is_authentication());
        assert_eq!(
            err.as_authentication().and_then(AuthenticationError::error),
            Some("invalid_grant")
        );
        assert!(!CredentialsError::MissingRefreshToken.is_authentication());
    }
}
