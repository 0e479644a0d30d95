//! PostgreSQL connectivity for the taskboard services.
//!
//! Wraps SeaORM with the pieces every binary needs at startup: env-driven
//! pool configuration, connect-with-retry, a migrations runner, and a
//! `SELECT 1` health probe for readiness endpoints.
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::postgres::{self, PostgresConfig};
//! use migration::Migrator;
//!
//! let config = PostgresConfig::from_env()?;
//! let db = postgres::connect_from_config_with_retry(config, None).await?;
//! postgres::run_migrations::<Migrator>(&db, "taskboard-api").await?;
//! ```

pub mod common;
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult};
