// Gateway and API error types
use serde::Deserialize;

/// Error envelope returned by the admin backend on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error_code: String,
    pub message: String,
    #[serde(default)]
    pub raw_error: Option<String>,
}

/// Failure modes of the session gateway, in order of how they reach callers:
/// transport errors and terminal API errors propagate unchanged, while an
/// unrecoverable 401 (no refresh token after a refresh was warranted, or a
/// failed refresh call) surfaces as `SessionExpired` with the session store
/// already cleared. Navigation back to login is the caller's job.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("session expired, please login again")]
    SessionExpired,

    #[error("{message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("session storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl GatewayError {
    /// Build the terminal error for a non-2xx response. A parseable error
    /// envelope contributes `error_code` and `message`; anything else falls
    /// back to a generic message carrying only the status.
    pub fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => GatewayError::Api {
                status,
                code: Some(envelope.error_code),
                message: envelope.message,
            },
            Err(_) => GatewayError::Api {
                status,
                code: None,
                message: "Request failed".to_string(),
            },
        }
    }

    /// HTTP status of the terminal response, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Api { status, .. } => Some(*status),
            GatewayError::SessionExpired => Some(401),
            _ => None,
        }
    }

    /// Backend error code for UI-level branching.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            GatewayError::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, GatewayError::SessionExpired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_is_parsed_into_code_and_message() {
        let err = GatewayError::from_response(
            409,
            r#"{"error_code":"DUPLICATE_CAMPAIGN","message":"Campaign already exists"}"#,
        );
        assert_eq!(err.status(), Some(409));
        assert_eq!(err.error_code(), Some("DUPLICATE_CAMPAIGN"));
        assert_eq!(err.to_string(), "Campaign already exists");
    }

    #[test]
    fn malformed_body_falls_back_to_generic_message() {
        let err = GatewayError::from_response(502, "<html>bad gateway</html>");
        assert_eq!(err.status(), Some(502));
        assert_eq!(err.error_code(), None);
        assert_eq!(err.to_string(), "Request failed");
    }
}
