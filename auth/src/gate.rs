use std::sync::Arc;

use thiserror::Error;

use crate::jwt::TokenService;

const BEARER_SCHEME: &str = "Bearer";

/// Uniform rejection from [`IdentityGate::authenticate`].
///
/// Carries no reason on purpose: callers cannot tell a missing header from
/// an expired or forged token.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("Unauthorized")]
pub struct Unauthorized;

/// Request-facing identity check.
///
/// Turns the raw value of an `Authorization` header into the id of the
/// authenticated user. Trusts the token once its signature and expiry check
/// out; no user lookup happens here.
#[derive(Clone)]
pub struct IdentityGate {
    tokens: Arc<TokenService>,
}

impl IdentityGate {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }

    /// Authenticate a request from its `Authorization` header value.
    ///
    /// # Errors
    /// * `Unauthorized` - Header absent, not a bearer credential, or the token
    ///   failed validation
    pub fn authenticate(&self, header: Option<&str>) -> Result<i64, Unauthorized> {
        let header = header.ok_or_else(|| {
            tracing::debug!("Missing Authorization header");
            Unauthorized
        })?;

        let token = extract_bearer(header).ok_or_else(|| {
            tracing::debug!("Authorization header is not a bearer credential");
            Unauthorized
        })?;

        self.tokens.validate(token).map_err(|_| Unauthorized)
    }
}

/// Extract the credential from a `Bearer <token>` header value.
///
/// The scheme name is case-insensitive (RFC 7235); the token must be
/// non-empty and contain no whitespace.
pub fn extract_bearer(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;

    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return None;
    }

    let token = token.trim_start();
    if token.is_empty() || token.contains(char::is_whitespace) {
        return None;
    }

    Some(token)
}
