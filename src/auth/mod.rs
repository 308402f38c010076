//! OAuth2 credential records for the Spotify token endpoint.

pub mod credentials;
pub mod endpoint;
pub mod grant;
pub mod scope;
pub mod token;

pub use credentials::{
    App, ClientCredentials, CredentialKind, Credentials, TokenSnapshot, User, UserCredentials,
    UserGrant,
};
pub use endpoint::{TokenEndpoint, TokenResponse};
pub use grant::Grant;
pub use scope::Scope;
pub use token::{ExpiryClock, TokenPayload};
