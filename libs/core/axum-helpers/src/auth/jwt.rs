use super::config::JwtConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default JWT token time-to-live values in seconds
pub const ACCESS_TOKEN_TTL: i64 = 900; // 15 minutes
pub const REFRESH_TOKEN_TTL: i64 = 604800; // 7 days

/// Distinguishes the two halves of a token pair.
///
/// A refresh token can never authenticate a request, and an access token
/// can never mint a new pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,     // Subject (user ID)
    pub email: String,   // User email
    pub name: String,    // User name
    pub kind: TokenKind, // Access or refresh
    pub exp: i64,        // Expiration time
    pub iat: i64,        // Issued at
    pub jti: String,     // JWT ID
}

/// Stateless JWT authentication.
///
/// Tokens are self-contained: verification checks the HS256 signature and
/// expiry, with no storage lookup. Issued tokens cannot be revoked before
/// they expire, which is why the access TTL stays short and refresh tokens
/// are re-checked against the user store when exchanged.
#[derive(Clone)]
pub struct JwtAuth {
    secret: String,
    access_ttl: i64,
    refresh_ttl: i64,
}

impl JwtAuth {
    /// Create a new JWT auth instance.
    ///
    /// # Example
    /// ```ignore
    /// use axum_helpers::{JwtAuth, JwtConfig};
    /// use core_config::FromEnv;
    ///
    /// let config = JwtConfig::from_env()?;
    /// let jwt_auth = JwtAuth::new(&config);
    /// ```
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            secret: config.secret.clone(),
            access_ttl: config.access_ttl,
            refresh_ttl: config.refresh_ttl,
        }
    }

    /// Access token lifetime in seconds; doubles as the cookie Max-Age.
    pub fn access_ttl(&self) -> i64 {
        self.access_ttl
    }

    /// Refresh token lifetime in seconds; doubles as the cookie Max-Age.
    pub fn refresh_ttl(&self) -> i64 {
        self.refresh_ttl
    }

    /// Create a short-lived access token
    pub fn create_access_token(
        &self,
        user_id: &str,
        email: &str,
        name: &str,
    ) -> eyre::Result<String> {
        self.create_token(user_id, email, name, TokenKind::Access, self.access_ttl)
    }

    /// Create a long-lived refresh token
    pub fn create_refresh_token(
        &self,
        user_id: &str,
        email: &str,
        name: &str,
    ) -> eyre::Result<String> {
        self.create_token(user_id, email, name, TokenKind::Refresh, self.refresh_ttl)
    }

    /// Create a JWT token of the given kind and TTL
    fn create_token(
        &self,
        user_id: &str,
        email: &str,
        name: &str,
        kind: TokenKind,
        ttl_seconds: i64,
    ) -> eyre::Result<String> {
        let now = Utc::now();
        let exp = (now + Duration::seconds(ttl_seconds)).timestamp();
        let iat = now.timestamp();
        let jti = Uuid::new_v4().to_string();

        let claims = JwtClaims {
            sub: user_id.to_string(),
            email: email.to_string(),
            name: name.to_string(),
            kind,
            exp,
            iat,
            jti,
        };

        let header = Header {
            alg: jsonwebtoken::Algorithm::HS256,
            ..Default::default()
        };

        let token = encode(
            &header,
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;

        Ok(token)
    }

    /// Verify signature and expiry and decode claims, regardless of kind
    pub fn verify_token(&self, token: &str) -> eyre::Result<JwtClaims> {
        let token_data = decode::<JwtClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    /// Verify a token and require it to be an access token
    pub fn verify_access_token(&self, token: &str) -> eyre::Result<JwtClaims> {
        let claims = self.verify_token(token)?;
        if claims.kind != TokenKind::Access {
            eyre::bail!("token is not an access token");
        }
        Ok(claims)
    }

    /// Verify a token and require it to be a refresh token
    pub fn verify_refresh_token(&self, token: &str) -> eyre::Result<JwtClaims> {
        let claims = self.verify_token(token)?;
        if claims.kind != TokenKind::Refresh {
            eyre::bail!("token is not a refresh token");
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("test-secret-with-at-least-32-chars!!"))
    }

    #[test]
    fn access_token_round_trip() {
        let auth = auth();
        let token = auth
            .create_access_token("user-1", "alice@example.com", "Alice")
            .unwrap();

        let claims = auth.verify_access_token(&token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.name, "Alice");
        assert_eq!(claims.kind, TokenKind::Access);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn refresh_token_cannot_act_as_access_token() {
        let auth = auth();
        let token = auth
            .create_refresh_token("user-1", "alice@example.com", "Alice")
            .unwrap();

        assert!(auth.verify_access_token(&token).is_err());
        assert!(auth.verify_refresh_token(&token).is_ok());
    }

    #[test]
    fn access_token_cannot_act_as_refresh_token() {
        let auth = auth();
        let token = auth
            .create_access_token("user-1", "alice@example.com", "Alice")
            .unwrap();

        assert!(auth.verify_refresh_token(&token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        // TTL far enough in the past to clear the default 60s leeway
        let config = JwtConfig {
            secret: "test-secret-with-at-least-32-chars!!".to_string(),
            access_ttl: -120,
            refresh_ttl: REFRESH_TOKEN_TTL,
        };
        let auth = JwtAuth::new(&config);
        let token = auth
            .create_access_token("user-1", "alice@example.com", "Alice")
            .unwrap();

        assert!(auth.verify_access_token(&token).is_err());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let auth = auth();
        let other = JwtAuth::new(&JwtConfig::new("another-secret-with-at-least-32-chars"));
        let token = auth
            .create_access_token("user-1", "alice@example.com", "Alice")
            .unwrap();

        assert!(other.verify_token(&token).is_err());
    }

    #[test]
    fn each_token_gets_a_unique_jti() {
        let auth = auth();
        let first = auth
            .create_access_token("user-1", "alice@example.com", "Alice")
            .unwrap();
        let second = auth
            .create_access_token("user-1", "alice@example.com", "Alice")
            .unwrap();

        let first_claims = auth.verify_token(&first).unwrap();
        let second_claims = auth.verify_token(&second).unwrap();
        assert_ne!(first_claims.jti, second_claims.jti);
    }
}
