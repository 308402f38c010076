//! Convenience re-exports for common use.

pub use crate::auth::{
    ClientCredentials, Scope, TokenEndpoint, TokenPayload, TokenResponse, UserCredentials,
};
pub use crate::config::CredentialsConfig;
pub use crate::error::{AuthenticationError, CredentialsError, Result};
