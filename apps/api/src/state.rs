//! Application state management.
//!
//! This module defines the shared application state passed to all request handlers.
//! The state contains:
//! - Configuration
//! - Database connection
//! - JWT authentication

use axum_helpers::JwtAuth;

/// Shared application state.
///
/// This struct is cloned for each handler (inexpensive Arc clones), providing access to:
/// - Application configuration
/// - PostgreSQL database connection pool
/// - JWT token issuer/verifier (cheap to clone, shares encoding keys)
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL database connection pool
    pub db: database::postgres::DatabaseConnection,
    /// JWT authentication (token creation and verification)
    pub jwt_auth: JwtAuth,
}
