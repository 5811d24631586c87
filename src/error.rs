//! Error types for rustgscitations.
//!
//! Only transport-tier failures live here. Field extraction failures use
//! [`crate::extract::FieldMissing`] and never escape a record parser.

use thiserror::Error;

/// Main error type for scholar operations.
#[derive(Debug, Error)]
pub enum ScholarError {
    /// The service answered with a non-success status
    #[error("Remote error: {status} from {url}")]
    Remote {
        /// HTTP status code
        status: u16,
        /// URL that was requested
        url: String,
    },

    /// Network/HTTP transport error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// CAPTCHA interstitial served instead of the requested page
    #[error("CAPTCHA detected, requests are being blocked")]
    Captcha,

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),
}

impl ScholarError {
    /// Whether the failure came from the remote side rather than local setup.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            ScholarError::Remote { .. } | ScholarError::Network(_) | ScholarError::Captcha
        )
    }
}

/// Result type alias using `ScholarError`
pub type Result<T> = std::result::Result<T, ScholarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_message() {
        let err = ScholarError::Remote {
            status: 503,
            url: "https://scholar.google.ca/citations?user=x".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("503"));
        assert!(msg.contains("user=x"));
        assert!(err.is_remote());
    }

    #[test]
    fn test_config_error_is_local() {
        let err = ScholarError::Config("bad base url".to_string());
        assert!(!err.is_remote());
        assert_eq!(err.to_string(), "Config error: bad base url");
    }
}
