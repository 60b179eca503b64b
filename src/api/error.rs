use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    /// The identity endpoint answered with a non-success status. The message
    /// carries the server's own `error` field when the body has one.
    #[error("{message} (HTTP {status})")]
    Rejected { status: StatusCode, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    #[error("Session storage error: {0}")]
    Storage(anyhow::Error),

    #[error("Social login failed: {0}")]
    Provider(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl AuthError {
    /// Truncate a response body to avoid carrying excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut cut = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..cut], body.len())
    }

    /// Build a `Rejected` error from a failed identity call.
    ///
    /// Spree reports failures as `{"error": "..."}`; when that field is
    /// present its text becomes the message, otherwise the raw body does.
    pub(crate) fn from_response(status: StatusCode, body: &str) -> Self {
        if body.trim().is_empty() {
            let message = status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string();
            return AuthError::Rejected { status, message };
        }

        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
            .unwrap_or_else(|| Self::truncate_body(body));

        AuthError::Rejected { status, message }
    }

    /// True when the server explicitly turned the request down, as opposed
    /// to the call never completing or storage misbehaving.
    pub fn is_rejection(&self) -> bool {
        matches!(self, AuthError::Rejected { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response_extracts_spree_error_field() {
        let err = AuthError::from_response(
            StatusCode::UNAUTHORIZED,
            r#"{"error":"Invalid email or password."}"#,
        );
        match err {
            AuthError::Rejected { status, message } => {
                assert_eq!(status, StatusCode::UNAUTHORIZED);
                assert_eq!(message, "Invalid email or password.");
            }
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_from_response_falls_back_to_raw_body() {
        let err = AuthError::from_response(StatusCode::UNPROCESSABLE_ENTITY, "<html>boom</html>");
        match err {
            AuthError::Rejected { message, .. } => assert_eq!(message, "<html>boom</html>"),
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_from_response_empty_body_uses_status_reason() {
        let err = AuthError::from_response(StatusCode::INTERNAL_SERVER_ERROR, "");
        match err {
            AuthError::Rejected { message, .. } => assert_eq!(message, "Internal Server Error"),
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_long_bodies_are_truncated() {
        let body = "x".repeat(2000);
        let err = AuthError::from_response(StatusCode::BAD_GATEWAY, &body);
        match err {
            AuthError::Rejected { message, .. } => {
                assert!(message.len() < 600);
                assert!(message.contains("truncated, 2000 total bytes"));
            }
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        // the leading byte pushes every 4-byte scalar off the cut point
        let body = format!("a{}", "\u{1F600}".repeat(200));
        let err = AuthError::from_response(StatusCode::BAD_GATEWAY, &body);
        match err {
            AuthError::Rejected { message, .. } => assert!(message.contains("truncated")),
            other => panic!("expected Rejected, got {:?}", other),
        }
    }
}
