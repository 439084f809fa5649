use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::user::errors::EmailError;

/// Token type label returned alongside every access token.
pub const BEARER_TOKEN_TYPE: &str = "bearer";

/// User aggregate entity.
///
/// Represents a registered user. The password hash is always a PHC string
/// produced by the password hasher.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// User about to be persisted; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser. Kept exactly as
/// given: comparison and uniqueness are case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to register a new user
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub email: EmailAddress,
    pub password: String,
}

impl RegisterUserCommand {
    /// Construct a new registration command.
    ///
    /// # Arguments
    /// * `email` - Validated email address
    /// * `password` - Plain text password (will be hashed by service)
    pub fn new(email: EmailAddress, password: String) -> Self {
        Self { email, password }
    }
}

/// Command to log in with email and password.
///
/// The email is not validated: a malformed address simply matches no user.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

/// Access token handed out on successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
}

impl AccessToken {
    pub fn bearer(access_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            token_type: BEARER_TOKEN_TYPE,
            expires_in,
        }
    }
}
