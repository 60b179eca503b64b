use async_trait::async_trait;

use crate::auth::session::UserSession;

use super::AuthError;

/// External OAuth flow behind `SessionClient::social_login`.
///
/// The host shell owns the actual provider dance (system browser, redirect
/// capture, token exchange); this client only needs the session record the
/// identity endpoint issues at the end of it. Implementations report a flow
/// that did not produce a session as [`AuthError::Provider`].
#[async_trait]
pub trait OauthProvider: Send + Sync {
    /// Run the flow for a named provider ("facebook", "google", ...) and
    /// return the issued session record.
    async fn authenticate(&self, provider: &str) -> Result<UserSession, AuthError>;
}
