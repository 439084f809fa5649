use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password is empty")]
    Empty,

    #[error("Password too long: maximum {max} bytes, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}

impl PasswordError {
    /// Whether the error was caused by the caller's input rather than the hasher.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, PasswordError::Empty | PasswordError::TooLong { .. })
    }
}
