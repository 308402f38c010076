use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::debug;

use super::endpoint::{exchange, TokenEndpoint};
use super::grant::Grant;
use super::scope::Scope;
use super::token::{ExpiryClock, TokenPayload};
use crate::config::CredentialsConfig;
use crate::error::{CredentialsError, Result};

mod sealed {
    pub trait Sealed {}
}

/// The closed set of credential flavours: [`App`] and [`User`].
///
/// Each kind decides which grant refreshes it and which extra fields it keeps
/// on top of the shared token fields.
pub trait CredentialKind: sealed::Sealed + Send + Sync + 'static {
    /// Kind-specific state stored next to the token.
    type Extra: Clone + fmt::Debug + Send + Sync;

    const NAME: &'static str;

    /// Extra state for a freshly constructed record.
    fn initial_extra(payload: &TokenPayload) -> std::result::Result<Self::Extra, String>;

    /// Grant used to refresh a record holding `extra`.
    fn refresh_grant(extra: &Self::Extra) -> Result<Grant>;

    /// Extra state after a successful refresh returned `payload`.
    fn refreshed_extra(
        current: &Self::Extra,
        payload: &TokenPayload,
    ) -> std::result::Result<Self::Extra, String>;
}

/// App-only token from the client-credentials grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum App {}

/// User token from the refresh-token grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum User {}

impl sealed::Sealed for App {}
impl sealed::Sealed for User {}

impl CredentialKind for App {
    type Extra = ();

    const NAME: &'static str = "ClientCredentials";

    fn initial_extra(_payload: &TokenPayload) -> std::result::Result<(), String> {
        Ok(())
    }

    fn refresh_grant(_extra: &()) -> Result<Grant> {
        Ok(Grant::ClientCredentials)
    }

    fn refreshed_extra(_current: &(), _payload: &TokenPayload) -> std::result::Result<(), String> {
        Ok(())
    }
}

/// Fields only user credentials carry.
#[derive(Clone, PartialEq, Eq)]
pub struct UserGrant {
    pub scope: String,
    pub refresh_token: Option<String>,
}

impl fmt::Debug for UserGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserGrant")
            .field("scope", &self.scope)
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| ".."))
            .finish()
    }
}

impl CredentialKind for User {
    type Extra = UserGrant;

    const NAME: &'static str = "UserCredentials";

    fn initial_extra(payload: &TokenPayload) -> std::result::Result<UserGrant, String> {
        Ok(UserGrant {
            scope: required_scope(payload)?,
            refresh_token: payload.refresh_token.clone(),
        })
    }

    fn refresh_grant(extra: &UserGrant) -> Result<Grant> {
        let refresh_token = extra
            .refresh_token
            .clone()
            .ok_or(CredentialsError::MissingRefreshToken)?;
        Ok(Grant::RefreshToken { refresh_token })
    }

    fn refreshed_extra(
        current: &UserGrant,
        payload: &TokenPayload,
    ) -> std::result::Result<UserGrant, String> {
        // The stored refresh token outlives any the endpoint hands back.
        Ok(UserGrant {
            scope: required_scope(payload)?,
            refresh_token: current.refresh_token.clone(),
        })
    }
}

fn required_scope(payload: &TokenPayload) -> std::result::Result<String, String> {
    payload
        .scope
        .clone()
        .ok_or_else(|| "missing field `scope`".to_string())
}

/// Token fields of a record, read or written as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSnapshot<X> {
    pub access_token: String,
    pub token_type: String,
    pub clock: ExpiryClock,
    pub extra: X,
}

impl<X> TokenSnapshot<X> {
    pub fn expires_in(&self) -> u64 {
        self.clock.expires_in
    }

    pub fn last_authorized_time(&self) -> DateTime<Utc> {
        self.clock.issued_at
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.clock.is_expired_at(now)
    }
}

/// A refreshable OAuth2 credential record.
///
/// Use the [`ClientCredentials`] and [`UserCredentials`] aliases. Validity is
/// decided lazily: check [`is_expired`](Self::is_expired) before using the
/// token and call [`refresh`](Self::refresh) when it is. Nothing refreshes on
/// its own.
///
/// Records can be shared across tasks. Concurrent `refresh` calls on one
/// record are collapsed: a call that waited while another succeeded returns
/// without contacting the endpoint.
pub struct Credentials<K: CredentialKind> {
    config: CredentialsConfig,
    state: RwLock<TokenSnapshot<K::Extra>>,
    refresh_gate: tokio::sync::Mutex<()>,
    generation: AtomicU64,
    _kind: PhantomData<K>,
}

/// App-level credentials (client-credentials grant).
pub type ClientCredentials = Credentials<App>;

/// User-level credentials (refresh-token grant).
pub type UserCredentials = Credentials<User>;

impl<K: CredentialKind> fmt::Debug for Credentials<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.read_state();
        f.debug_struct(K::NAME)
            .field("client_id", &self.config.client_id())
            .field("token_url", &self.config.token_url())
            .field("token_type", &state.token_type)
            .field("expires_in", &state.clock.expires_in)
            .field("last_authorized_time", &state.clock.issued_at)
            .field("extra", &state.extra)
            .finish_non_exhaustive()
    }
}

impl<K: CredentialKind> Credentials<K> {
    /// Wrap a token payload obtained elsewhere. No network call.
    ///
    /// The expiry clock starts now. Fails with
    /// [`CredentialsError::Validation`] when a required field is missing.
    pub fn new(
        data: &Value,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self> {
        let payload = TokenPayload::from_value(data).map_err(CredentialsError::Validation)?;
        Self::from_payload(payload, CredentialsConfig::new(client_id, client_secret))
    }

    /// Wrap an already-typed payload.
    pub fn from_payload(payload: TokenPayload, config: CredentialsConfig) -> Result<Self> {
        let extra = K::initial_extra(&payload).map_err(CredentialsError::Validation)?;
        Ok(Self::assemble(payload, extra, config))
    }

    fn assemble(payload: TokenPayload, extra: K::Extra, config: CredentialsConfig) -> Self {
        Self {
            config,
            state: RwLock::new(TokenSnapshot {
                access_token: payload.access_token,
                token_type: payload.token_type,
                clock: ExpiryClock::starting_now(payload.expires_in),
                extra,
            }),
            refresh_gate: tokio::sync::Mutex::new(()),
            generation: AtomicU64::new(0),
            _kind: PhantomData,
        }
    }

    /// Point refreshes at another token endpoint.
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.config = self.config.with_token_url(url);
        self
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.read_state().clock.is_expired_at(now)
    }

    /// Mint a new access token and replace the token fields in place.
    ///
    /// On any failure the record is left exactly as it was.
    pub async fn refresh<E>(&self, endpoint: &E) -> Result<()>
    where
        E: TokenEndpoint + ?Sized,
    {
        let observed = self.generation.load(Ordering::Acquire);
        let _gate = self.refresh_gate.lock().await;
        if self.generation.load(Ordering::Acquire) != observed {
            debug!(kind = K::NAME, "Refresh satisfied by a concurrent refresh");
            return Ok(());
        }

        let grant = K::refresh_grant(&self.read_state().extra)?;
        let payload = exchange(endpoint, &self.config, &grant).await?;

        let current = self.read_state().extra.clone();
        let extra = K::refreshed_extra(&current, &payload).map_err(|reason| {
            CredentialsError::Protocol(format!("{} response: {reason}", grant.grant_type()))
        })?;

        *self.write_state() = TokenSnapshot {
            access_token: payload.access_token,
            token_type: payload.token_type,
            clock: ExpiryClock::starting_now(payload.expires_in),
            extra,
        };
        self.generation.fetch_add(1, Ordering::AcqRel);
        debug!(
            kind = K::NAME,
            expires_in = payload.expires_in,
            "Refreshed access token"
        );
        Ok(())
    }

    /// Refresh only when the token has expired. Returns whether it did.
    pub async fn refresh_if_expired<E>(&self, endpoint: &E) -> Result<bool>
    where
        E: TokenEndpoint + ?Sized,
    {
        if !self.is_expired() {
            return Ok(false);
        }
        self.refresh(endpoint).await?;
        Ok(true)
    }

    /// Consistent copy of the token fields.
    pub fn snapshot(&self) -> TokenSnapshot<K::Extra> {
        self.read_state().clone()
    }

    pub fn access_token(&self) -> String {
        self.read_state().access_token.clone()
    }

    pub fn token_type(&self) -> String {
        self.read_state().token_type.clone()
    }

    pub fn expires_in(&self) -> u64 {
        self.read_state().clock.expires_in
    }

    pub fn last_authorized_time(&self) -> DateTime<Utc> {
        self.read_state().clock.issued_at
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.read_state().clock.expires_at()
    }

    /// Value for the `Authorization` header of API requests.
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.read_state().access_token)
    }

    pub fn config(&self) -> &CredentialsConfig {
        &self.config
    }

    pub fn client_id(&self) -> &str {
        self.config.client_id()
    }

    pub fn client_secret(&self) -> &str {
        self.config.client_secret()
    }

    pub fn token_url(&self) -> &str {
        self.config.token_url()
    }

    // State is always replaced whole, so a poisoned lock still holds a
    // consistent value.
    fn read_state(&self) -> RwLockReadGuard<'_, TokenSnapshot<K::Extra>> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, TokenSnapshot<K::Extra>> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Credentials<App> {
    /// Run the client-credentials grant against the Spotify token endpoint.
    ///
    /// # Example
    /// ```no_run
    /// use spotcred::auth::ClientCredentials;
    ///
    /// # async fn example() -> spotcred::error::Result<()> {
    /// let http = reqwest::Client::new();
    /// let creds = ClientCredentials::from_client_secret("id", "secret", &http).await?;
    /// if creds.is_expired() {
    ///     creds.refresh(&http).await?;
    /// }
    /// println!("{}", creds.authorization_header());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn from_client_secret<E>(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        endpoint: &E,
    ) -> Result<Self>
    where
        E: TokenEndpoint + ?Sized,
    {
        Self::from_config(CredentialsConfig::new(client_id, client_secret), endpoint).await
    }

    pub async fn from_config<E>(config: CredentialsConfig, endpoint: &E) -> Result<Self>
    where
        E: TokenEndpoint + ?Sized,
    {
        let payload = exchange(endpoint, &config, &Grant::ClientCredentials).await?;
        Ok(Self::assemble(payload, (), config))
    }
}

impl Credentials<User> {
    /// Trade a refresh token for a user access token.
    ///
    /// A refresh token in the response wins; otherwise the given one is
    /// attached so the record can refresh later.
    pub async fn from_refresh_token<E>(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        endpoint: &E,
        refresh_token: impl Into<String>,
    ) -> Result<Self>
    where
        E: TokenEndpoint + ?Sized,
    {
        Self::from_refresh_token_with_config(
            CredentialsConfig::new(client_id, client_secret),
            endpoint,
            refresh_token,
        )
        .await
    }

    pub async fn from_refresh_token_with_config<E>(
        config: CredentialsConfig,
        endpoint: &E,
        refresh_token: impl Into<String>,
    ) -> Result<Self>
    where
        E: TokenEndpoint + ?Sized,
    {
        let refresh_token = refresh_token.into();
        let grant = Grant::RefreshToken {
            refresh_token: refresh_token.clone(),
        };
        let mut payload = exchange(endpoint, &config, &grant).await?;
        if payload.refresh_token.is_none() {
            payload.refresh_token = Some(refresh_token);
        }

        let extra = User::initial_extra(&payload).map_err(|reason| {
            CredentialsError::Protocol(format!("{} response: {reason}", grant.grant_type()))
        })?;
        Ok(Self::assemble(payload, extra, config))
    }

    /// Space-delimited scopes granted to the token.
    pub fn scope(&self) -> String {
        self.read_state().extra.scope.clone()
    }

    pub fn scopes(&self) -> Vec<String> {
        self.read_state()
            .extra
            .scope
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    pub fn has_scope(&self, scope: Scope) -> bool {
        self.read_state()
            .extra
            .scope
            .split_whitespace()
            .any(|granted| granted == scope.as_ref())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read_state().extra.refresh_token.clone()
    }
}
