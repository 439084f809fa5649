use std::sync::Arc;
use std::sync::OnceLock;

use chrono::Duration;

use crate::gate::IdentityGate;
use crate::jwt::TokenError;
use crate::jwt::TokenService;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuance.
///
/// Shared across requests behind an `Arc`; holds no mutable state.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    tokens: Arc<TokenService>,
    gate: IdentityGate,
    decoy_hash: OnceLock<String>,
}

/// Plaintext behind the decoy hash used for logins to unknown accounts.
const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,
    /// Seconds until the token expires
    pub expires_in: i64,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    pub fn new(tokens: TokenService) -> Self {
        let tokens = Arc::new(tokens);
        Self {
            password_hasher: PasswordHasher::new(),
            gate: IdentityGate::new(Arc::clone(&tokens)),
            tokens,
            decoy_hash: OnceLock::new(),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Input rejected or hashing failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a password against its stored hash and issue a token for `user_id`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `TokenError` - Token generation failed
    pub fn login(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: i64,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.tokens.issue(user_id)?;

        Ok(AuthenticationResult {
            access_token,
            expires_in: self.tokens.ttl().num_seconds(),
        })
    }

    /// Reject a login for an account that does not exist.
    ///
    /// Runs the same password verification as `login` against a decoy hash,
    /// built on first use, so both rejections cost the same time.
    pub fn reject_unknown_account(&self, password: &str) -> AuthenticationError {
        let decoy_hash = self.decoy_hash.get_or_init(|| {
            self.password_hasher
                .hash(DECOY_PASSWORD)
                .unwrap_or_else(|e| {
                    tracing::error!(error = %e, "Failed to build decoy password hash");
                    String::new()
                })
        });

        let _ = self.password_hasher.verify(password, decoy_hash);
        AuthenticationError::InvalidCredentials
    }

    /// Identity gate for protected requests.
    pub fn gate(&self) -> &IdentityGate {
        &self.gate
    }

    pub fn token_ttl(&self) -> Duration {
        self.tokens.ttl()
    }
}
