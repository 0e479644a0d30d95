//! Authentication and authorization module.
//!
//! This module provides:
//! - Stateless JWT token pairs: short-lived access tokens and long-lived
//!   refresh tokens, distinguished by a `kind` claim
//! - Set-Cookie helpers for carrying the token pair in HttpOnly cookies
//! - Authentication middleware for protected routes
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::auth::{JwtAuth, JwtConfig, jwt_auth_middleware};
//! use core_config::FromEnv;
//!
//! // Load config and create auth instance
//! let config = JwtConfig::from_env()?;
//! let auth = JwtAuth::new(&config);
//!
//! // Protect routes with JWT middleware
//! let protected = Router::new()
//!     .route("/api/protected", get(handler))
//!     .layer(axum::middleware::from_fn_with_state(auth, jwt_auth_middleware));
//! ```

pub mod config;
pub mod cookies;
pub mod jwt;
pub mod middleware;

// Re-export commonly used types
pub use config::JwtConfig;
pub use cookies::{
    ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE, auth_cookie, clear_auth_cookie, cookie_value,
};
pub use jwt::{ACCESS_TOKEN_TTL, JwtAuth, JwtClaims, REFRESH_TOKEN_TTL, TokenKind};
pub use middleware::jwt_auth_middleware;
