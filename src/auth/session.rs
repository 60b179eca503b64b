use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::auth::store::SessionStore;

/// Storage key holding the serialized session record
pub(crate) const SESSION_KEY: &str = "user";

/// Literal leftovers some web shells write when clearing a slot through
/// JavaScript; both read as "no session".
const CLEARED_SLOT_LITERALS: [&str; 2] = ["null", "undefined"];

/// The session record issued by the identity endpoint on login or
/// registration.
///
/// Every field is optional: the server decides what a session carries, and
/// this client passes the record through rather than validating its shape.
/// Fields it has no name for land in `extra`, so a record survives a
/// store-and-reload unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserSession {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spree_api_key: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Read the stored session record, if any.
///
/// A failing store read, a cleared-slot literal, and a record that does not
/// parse all come back as `None`. Logged-out is the safe reading of every
/// broken state here; the caller can always log in again.
pub(crate) fn read_session(store: &dyn SessionStore) -> Option<UserSession> {
    let raw = match store.get(SESSION_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!(error = %e, "Failed to read stored session");
            return None;
        }
    };
    parse_session(&raw)
}

pub(crate) fn parse_session(raw: &str) -> Option<UserSession> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || CLEARED_SLOT_LITERALS.contains(&trimmed) {
        return None;
    }

    match serde_json::from_str(trimmed) {
        Ok(session) => Some(session),
        Err(e) => {
            warn!(error = %e, "Stored session is not valid JSON, treating as logged out");
            None
        }
    }
}

/// Persist a serialized session record under the fixed session key.
pub(crate) fn write_session(store: &dyn SessionStore, raw: &str) -> anyhow::Result<()> {
    store.set(SESSION_KEY, raw)
}

/// Drop the stored session record.
pub(crate) fn clear_session(store: &dyn SessionStore) -> anyhow::Result<()> {
    store.remove(SESSION_KEY)
}
