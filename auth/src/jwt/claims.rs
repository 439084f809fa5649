use chrono::Duration;
use serde::Deserialize;
use serde::Serialize;

/// Identity token payload.
///
/// `sub` carries the numeric user id as a decimal string, as RFC 7519
/// requires the subject to be a string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a user, expiring `ttl` after `issued_at`.
    pub fn for_user(user_id: i64, issued_at: i64, ttl: Duration) -> Self {
        Self {
            sub: user_id.to_string(),
            iat: issued_at,
            exp: issued_at + ttl.num_seconds(),
        }
    }

    /// Parse the subject back into a user id.
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }

    /// Check if token is expired. A token is still valid at exactly `exp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
