//! Error types for RakshaMitra.
//!
//! Classification outcomes are verdicts, not errors. This type covers
//! startup failures and the alert mail path, whose failures are only logged.

use thiserror::Error;

/// Unified error type for RakshaMitra operations.
#[derive(Debug, Error)]
pub enum RakshaError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid unsafe pattern '{name}': {source}")]
    Pattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("Mail setup error: {0}")]
    MailSetup(String),

    #[error("Invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Failed to build alert message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("Mail delivery failed: {0}")]
    Delivery(#[from] lettre::transport::smtp::Error),
}

/// Result type alias for RakshaMitra operations.
pub type RakshaResult<T> = Result<T, RakshaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_error_names_rule() {
        let source = regex::Regex::new("(unclosed").unwrap_err();
        let err = RakshaError::Pattern {
            name: "broken".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("Invalid unsafe pattern 'broken'"));
    }

    #[test]
    fn test_address_error_converts() {
        let err: RakshaError = "not an address"
            .parse::<lettre::Address>()
            .unwrap_err()
            .into();
        assert!(matches!(err, RakshaError::Address(_)));
    }

    #[test]
    fn test_config_error_converts() {
        let err: RakshaError = config::ConfigError::NotFound("server.port".to_string()).into();
        assert!(matches!(err, RakshaError::Config(_)));
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
