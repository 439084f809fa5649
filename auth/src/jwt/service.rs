use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::clock::Clock;
use super::clock::SystemClock;
use super::errors::TokenError;

/// Shortest accepted signing secret, in bytes.
pub const MIN_SECRET_BYTES: usize = 32;

/// Default token lifetime in seconds.
pub const DEFAULT_TTL_SECONDS: i64 = 3600;

/// Signing configuration for [`TokenService`].
#[derive(Clone)]
pub struct TokenSettings {
    pub secret: Vec<u8>,
    pub algorithm: Algorithm,
    pub ttl: Duration,
}

impl TokenSettings {
    /// HS256 settings with the default TTL.
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
            algorithm: Algorithm::HS256,
            ttl: Duration::seconds(DEFAULT_TTL_SECONDS),
        }
    }

    /// Set the signing algorithm from its JWT name (`HS256`, `HS384`, `HS512`).
    pub fn with_algorithm_name(mut self, name: &str) -> Result<Self, TokenError> {
        self.algorithm = Algorithm::from_str(name)
            .map_err(|_| TokenError::Configuration(format!("unknown algorithm {}", name)))?;
        Ok(self)
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSettings")
            .field("secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// Issues and validates signed identity tokens.
///
/// The accepted algorithm is fixed at construction; the `alg` header of an
/// incoming token is checked against it, never used to pick the verifier.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validation: Validation,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    /// Create a token service reading time from the system clock.
    ///
    /// # Errors
    /// * `Configuration` - Secret shorter than `MIN_SECRET_BYTES`, a non-HMAC
    ///   algorithm, or a non-positive TTL
    pub fn new(settings: TokenSettings) -> Result<Self, TokenError> {
        Self::with_clock(settings, Arc::new(SystemClock))
    }

    /// Create a token service with an explicit time source.
    pub fn with_clock(settings: TokenSettings, clock: Arc<dyn Clock>) -> Result<Self, TokenError> {
        if settings.secret.len() < MIN_SECRET_BYTES {
            return Err(TokenError::Configuration(format!(
                "secret must be at least {} bytes, got {}",
                MIN_SECRET_BYTES,
                settings.secret.len()
            )));
        }

        if !matches!(
            settings.algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(TokenError::Configuration(format!(
                "{:?} is not a symmetric HMAC algorithm",
                settings.algorithm
            )));
        }

        if settings.ttl <= Duration::zero() {
            return Err(TokenError::Configuration(
                "ttl must be positive".to_string(),
            ));
        }

        let mut validation = Validation::new(settings.algorithm);
        // Expiry is checked against `clock` after the signature is verified.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(&settings.secret),
            decoding_key: DecodingKey::from_secret(&settings.secret),
            algorithm: settings.algorithm,
            validation,
            ttl: settings.ttl,
            clock,
        })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `user_id`, valid from now until now + TTL.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, user_id: i64) -> Result<String, TokenError> {
        let claims = Claims::for_user(user_id, self.clock.now(), self.ttl);

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Validate a token and return the user id it was issued for.
    ///
    /// # Errors
    /// * `Invalid` - Malformed, wrongly signed, expired, or carrying a
    ///   missing or non-numeric subject
    pub fn validate(&self, token: &str) -> Result<i64, TokenError> {
        self.decode_user_id(token).map_err(|reason| {
            tracing::debug!(reason = %reason, "Token rejected");
            TokenError::Invalid
        })
    }

    fn decode_user_id(&self, token: &str) -> Result<i64, String> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| e.to_string())?
            .claims;

        let now = self.clock.now();
        if claims.is_expired(now) {
            return Err(format!("expired at {}, now {}", claims.exp, now));
        }

        claims
            .user_id()
            .ok_or_else(|| format!("non-numeric subject {:?}", claims.sub))
    }
}
