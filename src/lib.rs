//! spotcred — Spotify OAuth2 credentials
//!
//! Acquires, tracks the expiry of, and refreshes access tokens for the
//! Spotify Web API through the client-credentials and refresh-token grants.
//! The HTTP client is always supplied by the caller.
//!
//! # Quick Start
//!
//! ```no_run
//! use spotcred::prelude::*;
//!
//! # async fn example() -> spotcred::error::Result<()> {
//! let http = reqwest::Client::new();
//! let user = UserCredentials::from_refresh_token("id", "secret", &http, "refresh-token").await?;
//! if user.is_expired() {
//!     user.refresh(&http).await?;
//! }
//! println!("{} ({})", user.authorization_header(), user.scope());
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod prelude;

#[cfg(feature = "cli")]
pub mod cli;
