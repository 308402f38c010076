use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use super::grant::Grant;
use super::token::TokenPayload;
use crate::config::CredentialsConfig;
use crate::error::{AuthenticationError, CredentialsError, Result};

/// Raw answer from the token endpoint: status plus the parsed JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenResponse {
    pub status: u16,
    pub body: Value,
}

/// HTTP collaborator able to POST a form and return the JSON answer.
///
/// The caller owns the client and its lifetime, timeouts and connection
/// pool; credentials only borrow it for one exchange.
#[async_trait]
pub trait TokenEndpoint: Send + Sync {
    async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<TokenResponse>;
}

#[async_trait]
impl TokenEndpoint for reqwest::Client {
    async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<TokenResponse> {
        let resp = self
            .post(url)
            .header("Accept", "application/json")
            .form(form)
            .send()
            .await?;
        let status = resp.status().as_u16();
        let bytes = resp.bytes().await?;
        let body = serde_json::from_slice(&bytes).map_err(|err| {
            CredentialsError::Protocol(format!(
                "token endpoint returned a non-JSON body (status {status}): {err}"
            ))
        })?;
        Ok(TokenResponse { status, body })
    }
}

/// Run one grant against the configured endpoint.
///
/// The `error` check comes before anything else and ignores the HTTP status.
pub(crate) async fn exchange<E>(
    endpoint: &E,
    config: &CredentialsConfig,
    grant: &Grant,
) -> Result<TokenPayload>
where
    E: TokenEndpoint + ?Sized,
{
    debug!(
        grant_type = grant.grant_type(),
        url = config.token_url(),
        "Requesting access token"
    );
    let form = grant.form(config.client_id(), config.client_secret());
    let response = endpoint.post_form(config.token_url(), &form).await?;

    if has_error(&response.body) {
        let err = AuthenticationError::new(response.status, response.body);
        warn!(
            grant_type = grant.grant_type(),
            status = err.status,
            error = err.error().unwrap_or("unknown"),
            "Token endpoint rejected grant"
        );
        return Err(err.into());
    }

    TokenPayload::from_value(&response.body).map_err(|reason| {
        CredentialsError::Protocol(format!(
            "{} response (status {}): {reason}",
            grant.grant_type(),
            response.status
        ))
    })
}

/// True when the body carries a truthy `error` field.
pub(crate) fn has_error(body: &Value) -> bool {
    body.get("error").is_some_and(is_truthy)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
