use thiserror::Error;

/// Error type for token operations.
///
/// Every validation failure collapses into `Invalid`; the reason is only
/// logged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid token configuration: {0}")]
    Configuration(String),

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Invalid or expired token")]
    Invalid,
}
