//! CLI handlers for minting and refreshing tokens.

use crate::auth::{ClientCredentials, Scope, UserCredentials};
use crate::config::CredentialsConfig;

/// Handle `spotcred token`.
pub async fn handle_token(
    http: &reqwest::Client,
    token_url: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(token_url)?;
    let creds = ClientCredentials::from_config(config, http).await?;

    println!("✅ App token issued");
    println!("   Type:    {}", creds.token_type());
    println!("   Token:   {}", creds.access_token());
    println!("   Expires: {}", describe_expiry(creds.expires_at()));
    Ok(())
}

/// Handle `spotcred refresh --refresh-token <RT>`.
pub async fn handle_refresh(
    http: &reqwest::Client,
    refresh_token: &str,
    token_url: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(token_url)?;
    let creds = UserCredentials::from_refresh_token_with_config(config, http, refresh_token).await?;

    println!("✅ User token refreshed");
    println!("   Type:    {}", creds.token_type());
    println!("   Token:   {}", creds.access_token());
    println!("   Scope:   {}", creds.scope());
    println!("   Expires: {}", describe_expiry(creds.expires_at()));
    Ok(())
}

/// Handle `spotcred scopes`.
pub fn handle_scopes() {
    for scope in Scope::all() {
        println!("{scope}");
    }
}

fn load_config(token_url: Option<String>) -> crate::error::Result<CredentialsConfig> {
    let config = CredentialsConfig::from_env()?;
    Ok(match token_url {
        Some(url) => config.with_token_url(url),
        None => config,
    })
}

fn describe_expiry(expires_at: Option<chrono::DateTime<chrono::Utc>>) -> String {
    match expires_at {
        Some(at) => at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => "never".to_string(),
    }
}
