use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;
use serde_json::Value;

/// Token payload as returned by the token endpoint.
///
/// `scope` and `refresh_token` are only meaningful for user credentials; the
/// client-credentials grant never returns them.
///
/// # Example
/// ```no_run
/// use spotcred::auth::TokenPayload;
/// use serde_json::json;
///
/// let payload = TokenPayload::from_value(&json!({
///     "access_token": "AT1",
///     "token_type": "Bearer",
///     "expires_in": 3600,
/// }))?;
/// assert_eq!(payload.access_token, "AT1");
/// # Ok::<(), String>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenPayload {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl TokenPayload {
    /// Parse and validate a JSON payload.
    ///
    /// Returns a description of the first missing or mistyped field; callers
    /// wrap it in the error kind that fits where the payload came from.
    pub fn from_value(value: &Value) -> Result<Self, String> {
        if !value.is_object() {
            return Err(format!("expected a JSON object, got {}", kind_of(value)));
        }
        Self::deserialize(value).map_err(|err| err.to_string())
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Issuance instant plus lifetime; the pair always moves together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryClock {
    pub issued_at: DateTime<Utc>,
    pub expires_in: u64,
}

impl ExpiryClock {
    pub fn new(issued_at: DateTime<Utc>, expires_in: u64) -> Self {
        Self {
            issued_at,
            expires_in,
        }
    }

    pub fn starting_now(expires_in: u64) -> Self {
        Self::new(Utc::now(), expires_in)
    }

    /// Expired once `now - issued_at >= expires_in`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        let elapsed_ms = i128::from(now.signed_duration_since(self.issued_at).num_milliseconds());
        elapsed_ms >= i128::from(self.expires_in) * 1000
    }

    /// `None` when the lifetime does not fit in a timestamp.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let lifetime = TimeDelta::try_seconds(i64::try_from(self.expires_in).ok()?)?;
        self.issued_at.checked_add_signed(lifetime)
    }
}
