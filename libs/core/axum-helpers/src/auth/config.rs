//! JWT configuration loaded from the environment.
//!
//! Implements the `FromEnv` trait from `core_config`, following the same
//! pattern as `PostgresConfig` and `ServerConfig`.

use super::jwt::{ACCESS_TOKEN_TTL, REFRESH_TOKEN_TTL};
use core_config::{ConfigError, FromEnv, env_parse_or_default, env_required};

/// JWT authentication configuration.
///
/// Loaded from environment variables:
/// - `JWT_SECRET` (required) - Must be at least 32 characters for security
/// - `ACCESS_TOKEN_TTL` (optional) - Access token lifetime in seconds, default 900
/// - `REFRESH_TOKEN_TTL` (optional) - Refresh token lifetime in seconds, default 604800
///
/// # Example
///
/// ```ignore
/// use axum_helpers::JwtConfig;
/// use core_config::FromEnv;
///
/// // From environment variables
/// let config = JwtConfig::from_env()?;
///
/// // Manual construction (for testing)
/// let config = JwtConfig::new("my-super-secret-key-that-is-at-least-32-chars");
/// ```
#[derive(Clone, Debug)]
pub struct JwtConfig {
    /// JWT signing secret (minimum 32 characters)
    pub secret: String,
    /// Access token lifetime in seconds
    pub access_ttl: i64,
    /// Refresh token lifetime in seconds
    pub refresh_ttl: i64,
}

impl JwtConfig {
    /// Create a new JwtConfig with the given secret and default TTLs.
    ///
    /// # Panics
    /// Panics if the secret is less than 32 characters.
    pub fn new(secret: impl Into<String>) -> Self {
        let secret = secret.into();
        assert!(
            secret.len() >= 32,
            "JWT secret must be at least 32 characters"
        );
        Self {
            secret,
            access_ttl: ACCESS_TOKEN_TTL,
            refresh_ttl: REFRESH_TOKEN_TTL,
        }
    }
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("JWT_SECRET")?;

        if secret.len() < 32 {
            return Err(ConfigError::ParseError {
                key: "JWT_SECRET".to_string(),
                details: format!(
                    "must be at least 32 characters for security (got {}). Generate one with: openssl rand -base64 32",
                    secret.len()
                ),
            });
        }

        Ok(Self {
            secret,
            access_ttl: env_parse_or_default("ACCESS_TOKEN_TTL", ACCESS_TOKEN_TTL),
            refresh_ttl: env_parse_or_default("REFRESH_TOKEN_TTL", REFRESH_TOKEN_TTL),
        })
    }
}
