//! Error types shared by the price alert jobs

use thiserror::Error;

/// Unified error type for credential loading, marketplace calls and notifications
#[derive(Debug, Error)]
pub enum Error {
    /// Required environment value is absent or empty
    #[error("Missing credential: {0} is not set")]
    MissingCredential(String),

    /// Marketplace rejected the credential (401/403)
    #[error("{provider} rejected the credential (HTTP {status})")]
    AuthExpired {
        provider: &'static str,
        status: reqwest::StatusCode,
    },

    /// Any other non-2xx status
    #[error("HTTP error: {status}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body: String,
    },

    /// HTTP request failed (network error, timeout, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Failed to build an OAuth signature
    #[error("Signing error: {0}")]
    Signing(String),

    /// The notifier could not deliver a message
    #[error("Notification failed: {0}")]
    Notification(Box<Error>),

    /// Credential cannot be sent as a header value
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

impl Error {
    /// Process exit status for a run that ended with this error
    pub fn exit_code(&self) -> u8 {
        1
    }

    /// Mark an error raised while delivering a message
    pub fn notification(err: Error) -> Self {
        match err {
            Error::Notification(_) => err,
            other => Error::Notification(Box::new(other)),
        }
    }

    /// True for 401/403 responses from a marketplace
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Error::AuthExpired { .. })
    }
}

/// Result alias for price alert operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credential_names_the_variable() {
        let err = Error::MissingCredential("TELEGRAM_BOT_TOKEN".to_string());
        assert_eq!(
            err.to_string(),
            "Missing credential: TELEGRAM_BOT_TOKEN is not set"
        );
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn auth_expired_is_detected() {
        let err = Error::AuthExpired {
            provider: "CardTrader",
            status: reqwest::StatusCode::UNAUTHORIZED,
        };
        assert!(err.is_auth_expired());
        assert!(err.to_string().contains("CardTrader"));
        assert!(err.to_string().contains("401"));

        let other = Error::HttpStatus {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            body: String::new(),
        };
        assert!(!other.is_auth_expired());
        assert_eq!(other.exit_code(), 1);
    }

    #[test]
    fn notification_wraps_once() {
        let err = Error::notification(Error::notification(Error::HttpStatus {
            status: reqwest::StatusCode::BAD_REQUEST,
            body: "chat not found".to_string(),
        }));
        match err {
            Error::Notification(inner) => {
                assert!(matches!(*inner, Error::HttpStatus { .. }))
            }
            other => panic!("Expected Notification, got: {other:?}"),
        }
    }
}
