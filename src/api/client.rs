//! Session client for the Spree storefront identity endpoints.
//!
//! This module provides the `SessionClient` struct for logging in and out,
//! registering accounts, driving password resets, and deriving the auth
//! header set the rest of a storefront's API calls need.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{header, Client};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::auth::session::{self, UserSession};
use crate::auth::state::{AuthState, AuthStateReceiver};
use crate::auth::store::SessionStore;
use crate::models::{AccountProfile, Credentials};

use super::oauth::OauthProvider;
use super::AuthError;

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
/// 30s allows for slow storefront responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Content-Type applied when the caller's headers carry none
const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Identity endpoint paths under the storefront base URL
const LOGIN_PATH: &str = "login.json";
const LOGOUT_PATH: &str = "logout.json";
const ACCOUNTS_PATH: &str = "auth/accounts";
const PASSWORDS_PATH: &str = "auth/passwords";
const AUTHORIZED_PATH: &str = "api/v1/users";

/// Auth header names the Spree server inspects on every call
const TOKEN_TYPE_HEADER: &str = "token-type";
const ACCESS_TOKEN_HEADER: &str = "access_token";
const CLIENT_HEADER: &str = "client";
const UID_HEADER: &str = "uid";
const SPREE_TOKEN_HEADER: &str = "x-spree-token";

/// Spree wraps every identity payload in a `spree_user` envelope
#[derive(Serialize)]
struct SpreeUser<'a, T: Serialize> {
    spree_user: &'a T,
}

/// Client for a Spree storefront's identity endpoints.
///
/// One value serves a whole app: logins and logouts go through it, the
/// persisted session record lives behind its [`SessionStore`], and every
/// other storefront call asks [`SessionClient::token_headers`] for its auth
/// header set. Clone is cheap - reqwest::Client pools connections behind an
/// Arc and the store and state feed are shared the same way.
#[derive(Clone)]
pub struct SessionClient {
    client: Client,
    base_url: String,
    store: Arc<dyn SessionStore>,
    oauth: Option<Arc<dyn OauthProvider>>,
    state: Arc<watch::Sender<AuthState>>,
}

/// Builder for [`SessionClient`]. Obtained via [`SessionClient::builder`].
pub struct SessionClientBuilder {
    base_url: String,
    store: Arc<dyn SessionStore>,
    oauth: Option<Arc<dyn OauthProvider>>,
    timeout: Duration,
}

impl SessionClientBuilder {
    /// Attach the OAuth provider behind [`SessionClient::social_login`].
    pub fn oauth(mut self, provider: Arc<dyn OauthProvider>) -> Self {
        self.oauth = Some(provider);
        self
    }

    /// Override the default request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<SessionClient, AuthError> {
        let client = Client::builder().timeout(self.timeout).build()?;

        // The feed's initial value mirrors whatever the store already holds,
        // so a restored session reads as logged in from the first borrow.
        let initial = match session::read_session(self.store.as_ref()) {
            Some(_) => AuthState::Authenticated,
            None => AuthState::Anonymous,
        };
        let (state, _) = watch::channel(initial);

        Ok(SessionClient {
            client,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            store: self.store,
            oauth: self.oauth,
            state: Arc::new(state),
        })
    }
}

impl SessionClient {
    /// Create a client for the storefront at `base_url`, persisting the
    /// session record through `store`.
    pub fn new(base_url: impl Into<String>, store: Arc<dyn SessionStore>) -> Result<Self, AuthError> {
        Self::builder(base_url, store).build()
    }

    pub fn builder(base_url: impl Into<String>, store: Arc<dyn SessionStore>) -> SessionClientBuilder {
        SessionClientBuilder {
            base_url: base_url.into(),
            store,
            oauth: None,
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }

    // ===== Identity Operations =====

    /// Authenticate with email and password.
    ///
    /// On success the server's session record is persisted verbatim and the
    /// auth-state feed flips to `Authenticated`; the record comes back so
    /// the caller can greet the user or route somewhere. On a rejection the
    /// server's own error message rides in [`AuthError::Rejected`] and
    /// nothing is stored.
    pub async fn login(&self, credentials: &Credentials) -> Result<UserSession, AuthError> {
        let url = self.endpoint(LOGIN_PATH);
        debug!(%url, "Logging in");

        let response = self
            .client
            .post(&url)
            .headers(self.request_headers())
            .json(&SpreeUser {
                spree_user: credentials,
            })
            .send()
            .await?;

        let body = Self::require_success(response).await?;
        self.adopt_session(&body)
    }

    /// Create an account. A successful registration logs the new user
    /// straight in, exactly like [`SessionClient::login`].
    pub async fn register(&self, profile: &AccountProfile) -> Result<UserSession, AuthError> {
        let url = self.endpoint(ACCOUNTS_PATH);
        debug!(%url, "Registering account");

        let response = self
            .client
            .post(&url)
            .headers(self.request_headers())
            .json(&SpreeUser {
                spree_user: profile,
            })
            .send()
            .await?;

        let body = Self::require_success(response).await?;
        self.adopt_session(&body)
    }

    /// Ask the storefront to send a password-reset email. Does not touch the
    /// stored session.
    pub async fn forget_password(&self, profile: &AccountProfile) -> Result<(), AuthError> {
        let url = self.endpoint(PASSWORDS_PATH);
        debug!(%url, "Requesting password reset");

        let response = self
            .client
            .post(&url)
            .headers(self.request_headers())
            .json(&SpreeUser {
                spree_user: profile,
            })
            .send()
            .await?;

        Self::require_success(response).await?;
        Ok(())
    }

    /// Change the password of the account named by `profile.id`. The id is
    /// required; without it there is no endpoint to address.
    pub async fn update_password(&self, profile: &AccountProfile) -> Result<(), AuthError> {
        let id = profile.id.ok_or(AuthError::MissingField("id"))?;
        let url = self.endpoint(&format!("{}/{}", PASSWORDS_PATH, id));
        debug!(%url, "Updating password");

        let response = self
            .client
            .put(&url)
            .headers(self.request_headers())
            .json(&SpreeUser {
                spree_user: profile,
            })
            .send()
            .await?;

        Self::require_success(response).await?;
        Ok(())
    }

    /// Probe whether the server still honors the stored session.
    ///
    /// The raw response comes back untouched; judging the status is the
    /// caller's business, so an expired session reads as `Ok` with a 401
    /// inside rather than as an `Err`.
    pub async fn authorized(&self) -> Result<reqwest::Response, AuthError> {
        let url = self.endpoint(AUTHORIZED_PATH);
        debug!(%url, "Checking authorization");

        let response = self
            .client
            .get(&url)
            .headers(self.request_headers())
            .send()
            .await?;
        Ok(response)
    }

    /// End the session.
    ///
    /// The stored record is dropped and the state feed flips to `Anonymous`
    /// whether or not the server call goes through; a returned `Err` means
    /// the server-side session may still be alive, never that this client
    /// is still logged in.
    pub async fn logout(&self) -> Result<(), AuthError> {
        let url = self.endpoint(LOGOUT_PATH);
        debug!(%url, "Logging out");

        let outcome = self
            .client
            .get(&url)
            .headers(self.request_headers())
            .send()
            .await;

        // Local teardown first, before the server's answer is even looked at
        session::clear_session(self.store.as_ref()).map_err(AuthError::Storage)?;
        self.publish(AuthState::Anonymous);

        let response = outcome?;
        Self::require_success(response).await?;
        Ok(())
    }

    /// Log in through the configured OAuth provider ("facebook", "google",
    /// ...).
    ///
    /// A provider that fails mid-flow surfaces as an ordinary `Err` value
    /// and leaves the stored session untouched; a successful flow persists
    /// the issued record just like a password login.
    pub async fn social_login(&self, provider: &str) -> Result<UserSession, AuthError> {
        let oauth = self.oauth.clone().ok_or_else(|| {
            AuthError::Provider(format!("no OAuth provider configured for {}", provider))
        })?;

        debug!(provider, "Starting social login");
        let record = oauth.authenticate(provider).await?;

        let raw = serde_json::to_string(&record)?;
        session::write_session(self.store.as_ref(), &raw).map_err(AuthError::Storage)?;
        self.publish(AuthState::Authenticated);
        Ok(record)
    }

    // ===== Headers and Session Introspection =====

    /// Build the auth header set for an outgoing storefront request.
    ///
    /// The caller's Content-Type is preserved when present and defaults to
    /// `application/json` otherwise. The four token fields come from the
    /// stored session record; when there is no session they are sent empty
    /// rather than omitted, which the server reads as an anonymous call.
    pub fn token_headers(&self, request_headers: &header::HeaderMap) -> header::HeaderMap {
        let record = session::read_session(self.store.as_ref()).unwrap_or_default();

        let content_type = request_headers
            .get(header::CONTENT_TYPE)
            .cloned()
            .unwrap_or_else(|| header::HeaderValue::from_static(DEFAULT_CONTENT_TYPE));

        let mut headers = header::HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, content_type);
        headers.insert(TOKEN_TYPE_HEADER, header::HeaderValue::from_static("Bearer"));
        headers.insert(ACCESS_TOKEN_HEADER, Self::field_value(record.access_token.as_deref()));
        headers.insert(CLIENT_HEADER, Self::field_value(record.client.as_deref()));
        headers.insert(UID_HEADER, Self::field_value(record.uid.as_deref()));
        headers.insert(SPREE_TOKEN_HEADER, Self::field_value(record.spree_api_key.as_deref()));
        headers
    }

    /// The stored session record, if one exists and parses.
    pub fn current_session(&self) -> Option<UserSession> {
        session::read_session(self.store.as_ref())
    }

    /// Whether a session record is currently stored. Record presence is the
    /// only signal; expiry is the server's call, not this client's.
    pub fn is_authenticated(&self) -> bool {
        self.current_session().is_some()
    }

    /// Subscribe to login and logout transitions.
    pub fn auth_state(&self) -> AuthStateReceiver {
        self.state.subscribe()
    }

    // ===== Internals =====

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Headers for the identity calls themselves; they carry the same set as
    /// any other storefront request.
    fn request_headers(&self) -> header::HeaderMap {
        self.token_headers(&header::HeaderMap::new())
    }

    /// Header value for one stored token field, empty when the field is
    /// unset or not header-safe.
    fn field_value(field: Option<&str>) -> header::HeaderValue {
        match field {
            Some(value) => header::HeaderValue::from_str(value).unwrap_or_else(|_| {
                warn!("Stored session field is not a valid header value, sending it empty");
                header::HeaderValue::from_static("")
            }),
            None => header::HeaderValue::from_static(""),
        }
    }

    /// Read the body of a successful response, turning any non-success
    /// status into an error that carries the server's message.
    async fn require_success(response: reqwest::Response) -> Result<String, AuthError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.text().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(AuthError::from_response(status, &body))
        }
    }

    /// Parse, persist, and announce a freshly issued session record. The raw
    /// body goes into the store as-is, so what is persisted is exactly what
    /// the server sent.
    fn adopt_session(&self, body: &str) -> Result<UserSession, AuthError> {
        let record: UserSession = serde_json::from_str(body)?;
        session::write_session(self.store.as_ref(), body).map_err(AuthError::Storage)?;
        self.publish(AuthState::Authenticated);
        Ok(record)
    }

    fn publish(&self, next: AuthState) {
        self.state.send_replace(next);
    }
}
