use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Longest plaintext accepted for hashing, in bytes.
///
/// Longer inputs are rejected, never truncated.
pub const MAX_PASSWORD_BYTES: usize = 1024;

/// Password hashing implementation.
///
/// Argon2id with default parameters and a fresh salt per hash. Hashing is
/// CPU and memory heavy, so async callers should run it on a blocking thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password.
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `Empty` - Password is empty
    /// * `TooLong` - Password exceeds `MAX_PASSWORD_BYTES`
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        Self::check_input(password)?;

        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// Returns `false` for a mismatch and for hashes that are not valid
    /// PHC strings.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::debug!(error = %e, "Stored password hash is not a valid PHC string");
                return false;
            }
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    fn check_input(password: &str) -> Result<(), PasswordError> {
        if password.is_empty() {
            return Err(PasswordError::Empty);
        }
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(PasswordError::TooLong {
                max: MAX_PASSWORD_BYTES,
                actual: password.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify(password, &hash));
        assert!(!hasher.verify("wrong_password", &hash));
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let hasher = PasswordHasher::new();

        let first = hasher.hash("hunter2").expect("Failed to hash password");
        let second = hasher.hash("hunter2").expect("Failed to hash password");

        assert_ne!(first, second);
        assert!(hasher.verify("hunter2", &first));
        assert!(hasher.verify("hunter2", &second));
    }

    #[test]
    fn test_verify_malformed_hash_is_false() {
        let hasher = PasswordHasher::new();

        assert!(!hasher.verify("password", "invalid_hash"));
        assert!(!hasher.verify("password", ""));
        // bcrypt-formatted hash from another system
        assert!(!hasher.verify(
            "password",
            "$2b$12$R9h/cIPz0gi.URNNX3kh2OPST9/PgBkqquzi.Ss7KIUgO2t0jWMUW"
        ));
    }

    #[test]
    fn test_hash_empty_password() {
        let hasher = PasswordHasher::new();

        let result = hasher.hash("");
        assert_eq!(result, Err(PasswordError::Empty));
        assert!(result.unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_hash_too_long_password() {
        let hasher = PasswordHasher::new();
        let password = "a".repeat(MAX_PASSWORD_BYTES + 1);

        let result = hasher.hash(&password);
        assert_eq!(
            result,
            Err(PasswordError::TooLong {
                max: MAX_PASSWORD_BYTES,
                actual: MAX_PASSWORD_BYTES + 1,
            })
        );
    }

    #[test]
    fn test_long_passwords_sharing_a_prefix_differ() {
        let hasher = PasswordHasher::new();
        let prefix = "x".repeat(100);
        let first = format!("{}first", prefix);
        let second = format!("{}second", prefix);

        let hash = hasher.hash(&first).expect("Failed to hash password");

        assert!(hasher.verify(&first, &hash));
        assert!(!hasher.verify(&second, &hash));
    }

    #[test]
    fn test_max_length_password_accepted() {
        let hasher = PasswordHasher::new();
        let password = "b".repeat(MAX_PASSWORD_BYTES);

        let hash = hasher.hash(&password).expect("Failed to hash password");
        assert!(hasher.verify(&password, &hash));
    }
}
