/*
[INPUT]:  Order attempt outcomes and failure messages
[OUTPUT]: The single status string consumed by the UI layer
[POS]:    Presentation boundary - status encoding
[UPDATE]: When changing the status wire format (coordinate with the UI)
*/

use std::fmt;

use crate::error::FlowError;

const SUCCESS_PREFIX: &str = "success|";

/// Terminal status of one order attempt.
///
/// Encodes to a single string: `success|<explorer url>` on success, or a
/// free-text failure message. The UI splits on the `success|` prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Success { url: String },
    Failure { message: String },
}

impl Status {
    pub fn success(url: impl Into<String>) -> Self {
        Status::Success { url: url.into() }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Status::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Status::Success { .. })
    }

    /// Decode a status line the way the UI layer does
    pub fn parse(line: &str) -> Self {
        match line.strip_prefix(SUCCESS_PREFIX) {
            Some(url) => Status::success(url),
            None => Status::failure(line),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Success { url } => write!(f, "{SUCCESS_PREFIX}{url}"),
            Status::Failure { message } => f.write_str(message),
        }
    }
}

impl From<FlowError> for Status {
    fn from(err: FlowError) -> Self {
        Status::failure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationFailure;

    #[test]
    fn test_success_encoding() {
        let status = Status::success("https://app.hyperliquid-testnet.xyz/explorer/tx/12345");
        assert_eq!(
            status.to_string(),
            "success|https://app.hyperliquid-testnet.xyz/explorer/tx/12345"
        );
        assert!(status.is_success());
    }

    #[test]
    fn test_parse_roundtrip() {
        let success = Status::success("https://example.com/tx/1");
        assert_eq!(Status::parse(&success.to_string()), success);

        let failure = Status::failure("Invalid trading pair");
        assert_eq!(Status::parse(&failure.to_string()), failure);
        assert!(!failure.is_success());
    }

    #[test]
    fn test_from_flow_error() {
        let status: Status = FlowError::Validation(ValidationFailure::AccountMissing).into();
        assert_eq!(
            status,
            Status::failure("Hyperliquid account does not exist for this wallet.")
        );
    }
}
