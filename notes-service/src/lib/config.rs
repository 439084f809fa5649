use std::env;
use std::fmt;
use std::time::Duration;

use auth::TokenError;
use auth::TokenSettings;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub password: PasswordConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Private in-memory database, gone when the pool closes.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Token signing configuration.
///
/// `secret` has no default: it must be provided by the environment
/// (`JWT__SECRET`) or a deployment-local config file.
#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: i64,
}

impl JwtConfig {
    /// Build token settings, validating the algorithm name.
    pub fn token_settings(&self) -> Result<TokenSettings, TokenError> {
        let ttl = chrono::Duration::try_seconds(self.ttl_seconds).ok_or_else(|| {
            TokenError::Configuration(format!(
                "jwt.ttl_seconds out of range: {}",
                self.ttl_seconds
            ))
        })?;

        Ok(TokenSettings::new(self.secret.as_bytes())
            .with_algorithm_name(&self.algorithm)?
            .with_ttl(ttl))
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    #[serde(default = "default_hash_timeout_seconds")]
    pub hash_timeout_seconds: u64,
}

impl PasswordConfig {
    pub fn hash_timeout(&self) -> Duration {
        Duration::from_secs(self.hash_timeout_seconds)
    }
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            hash_timeout_seconds: default_hash_timeout_seconds(),
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

fn default_ttl_seconds() -> i64 {
    auth::jwt::DEFAULT_TTL_SECONDS
}

fn default_hash_timeout_seconds() -> u64 {
    10
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, DATABASE__URL, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        configuration.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn parse(toml: &str) -> Result<Config, ConfigError> {
        ConfigBuilder::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    #[test]
    fn test_defaults_applied() {
        let config = parse(
            r#"
            [database]
            url = "sqlite::memory:"

            [server]
            http_port = 8080

            [jwt]
            secret = "test-secret-key-for-jwt-signing-at-least-32-bytes"
            "#,
        )
        .expect("Failed to parse config");

        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.jwt.algorithm, "HS256");
        assert_eq!(config.jwt.ttl_seconds, 3600);
        assert_eq!(config.password.hash_timeout(), Duration::from_secs(10));

        let settings = config.jwt.token_settings().expect("Invalid token settings");
        assert_eq!(settings.algorithm, jsonwebtoken::Algorithm::HS256);
        assert_eq!(settings.ttl.num_seconds(), 3600);
    }

    #[test]
    fn test_secret_is_required() {
        let result = parse(
            r#"
            [database]
            url = "sqlite::memory:"

            [server]
            http_port = 8080

            [jwt]
            ttl_seconds = 60
            "#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_algorithm_rejected() {
        let config = parse(
            r#"
            [database]
            url = "sqlite::memory:"

            [server]
            http_port = 8080

            [jwt]
            secret = "test-secret-key-for-jwt-signing-at-least-32-bytes"
            algorithm = "XS256"
            "#,
        )
        .expect("Failed to parse config");

        assert!(config.jwt.token_settings().is_err());
    }

    #[test]
    fn test_out_of_range_ttl_rejected() {
        let jwt = JwtConfig {
            secret: "test-secret-key-for-jwt-signing-at-least-32-bytes".to_string(),
            algorithm: default_algorithm(),
            ttl_seconds: i64::MAX,
        };

        assert!(matches!(
            jwt.token_settings(),
            Err(TokenError::Configuration(_))
        ));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let jwt = JwtConfig {
            secret: "super-secret-value".to_string(),
            algorithm: default_algorithm(),
            ttl_seconds: 60,
        };

        assert!(!format!("{:?}", jwt).contains("super-secret-value"));
    }

    #[test]
    fn test_shipped_default_file_has_no_secret() {
        let config = ConfigBuilder::builder()
            .add_source(File::from_str(
                include_str!("../../config/default.toml"),
                FileFormat::Toml,
            ))
            .build()
            .expect("Failed to read default config");

        assert!(config.get_string("jwt.secret").is_err());
    }
}
