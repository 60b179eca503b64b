use std::fmt;

use serde::Serialize;

/// Login identity pair.
///
/// Built per call and dropped afterwards; the client never stores
/// credentials, only the session record the server trades them for.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

// Keep passwords out of logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Account payload for the registration and password endpoints.
///
/// Only the fields a given call needs are set; unset fields stay off the
/// wire entirely.
#[derive(Clone, Default, Serialize)]
pub struct AccountProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_confirmation: Option<String>,
}

impl AccountProfile {
    /// Payload for creating an account.
    pub fn registration(
        email: impl Into<String>,
        password: impl Into<String>,
        password_confirmation: impl Into<String>,
    ) -> Self {
        Self {
            email: Some(email.into()),
            password: Some(password.into()),
            password_confirmation: Some(password_confirmation.into()),
            ..Self::default()
        }
    }

    /// Payload for requesting a password-reset email.
    pub fn reset_request(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }

    /// Payload for changing the password of the account with `id`.
    pub fn password_change(
        id: i64,
        password: impl Into<String>,
        password_confirmation: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id),
            password: Some(password.into()),
            password_confirmation: Some(password_confirmation.into()),
            ..Self::default()
        }
    }
}

impl fmt::Debug for AccountProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountProfile")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field(
                "password_confirmation",
                &self.password_confirmation.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}
