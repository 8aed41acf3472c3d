/*
[INPUT]:  Error sources (HTTP, API, signing, serialization)
[OUTPUT]: Structured error types with context and retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the Hyperliquid adapter
#[derive(Error, Debug)]
pub enum HyperliquidError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success HTTP status
    #[error("API error (code {code}): {message}")]
    Api { code: i32, message: String },

    /// The exchange rejected the action (`status: "err"` envelope)
    #[error("Exchange rejected action: {0}")]
    Exchange(String),

    /// Signing failed or key material was unusable
    #[error("Signing error: {0}")]
    Signing(String),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Action encoding for hashing failed
    #[error("Action encoding error: {0}")]
    ActionEncoding(#[from] rmp_serde::encode::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl HyperliquidError {
    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            HyperliquidError::Http(_) | HyperliquidError::InvalidResponse(_)
        )
    }

    /// Create an API error from status code and message
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        HyperliquidError::Api {
            code: status.as_u16() as i32,
            message: message.into(),
        }
    }
}

/// Result type alias for adapter operations
pub type Result<T> = std::result::Result<T, HyperliquidError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_retryable() {
        let invalid = HyperliquidError::InvalidResponse("truncated body".to_string());
        assert!(invalid.is_retryable());

        let rejected = HyperliquidError::Exchange("Insufficient margin".to_string());
        assert!(!rejected.is_retryable());

        let config = HyperliquidError::Config("bad key".to_string());
        assert!(!config.is_retryable());
    }

    #[test]
    fn test_api_error_creation() {
        let err = HyperliquidError::api_error(StatusCode::UNPROCESSABLE_ENTITY, "bad payload");
        match err {
            HyperliquidError::Api { code, message } => {
                assert_eq!(code, 422);
                assert_eq!(message, "bad payload");
            }
            _ => panic!("Expected Api error variant"),
        }
    }
}
