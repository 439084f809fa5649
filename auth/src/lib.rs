//! Authentication and session identity
//!
//! - Password hashing (Argon2id)
//! - Signed, time-bounded identity tokens (JWT, HMAC)
//! - Bearer identity gate for protected requests
//!
//! Free of HTTP and storage concerns; the service adapts these to its own
//! ports and error types.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("other_password", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{TokenService, TokenSettings};
//!
//! let tokens = TokenService::new(TokenSettings::new(b"secret_key_at_least_32_bytes_long!".to_vec())).unwrap();
//! let token = tokens.issue(42).unwrap();
//! assert_eq!(tokens.validate(&token).unwrap(), 42);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, TokenService, TokenSettings};
//!
//! let tokens = TokenService::new(TokenSettings::new(b"secret_key_at_least_32_bytes_long!".to_vec())).unwrap();
//! let auth = Authenticator::new(tokens);
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue a token
//! let result = auth.login("password123", &hash, 7).unwrap();
//!
//! // Protected request
//! let header = format!("Bearer {}", result.access_token);
//! assert_eq!(auth.gate().authenticate(Some(header.as_str())).unwrap(), 7);
//! ```

pub mod authenticator;
pub mod gate;
pub mod jwt;
pub mod password;

pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use gate::IdentityGate;
pub use gate::Unauthorized;
pub use jwt::Claims;
pub use jwt::Clock;
pub use jwt::FixedClock;
pub use jwt::TokenError;
pub use jwt::TokenService;
pub use jwt::TokenSettings;
pub use password::PasswordError;
pub use password::PasswordHasher;
