//! User storage.
//!
//! Records live in one of two interchangeable backends behind the
//! [`UserStore`] trait:
//!
//! - [`MemoryUserStore`] - process-local, lost on restart
//! - [`PgUserStore`] - `PostgreSQL`, durable and safe across instances
//!
//! The backend is chosen once at startup by [`open_user_store`]: a configured
//! database URL selects `PostgreSQL`, otherwise memory is used.
//!
//! # Database schema
//!
//! ## Tables
//!
//! - `users` - User records, with a unique index on `lower(email)`
//!
//! The schema in `db/schema.sql` is applied idempotently when the
//! `PostgreSQL` store connects.

pub mod memory;
pub mod users;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use stud_core::UserId;

use crate::config::ServerConfig;
use crate::models::user::{NewUser, UserRecord};

pub use memory::MemoryUserStore;
pub use users::PgUserStore;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Which backend a [`UserStore`] persists to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres,
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Memory => "memory",
            Self::Postgres => "postgres",
        })
    }
}

/// CRUD over user records.
///
/// Implementations guarantee that no two records share an email ignoring
/// case, even under concurrent `create` calls, and never reuse an id.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// The backend this store persists to.
    fn backend(&self) -> StoreBackend;

    /// All records, newest first.
    async fn list(&self) -> Result<Vec<UserRecord>, RepositoryError>;

    /// Store a new record with a fresh id.
    ///
    /// Fails with [`RepositoryError::Conflict`] if the email is taken.
    async fn create(&self, new_user: NewUser) -> Result<UserRecord, RepositoryError>;

    /// Fetch a record. Fails with [`RepositoryError::NotFound`] for unknown ids.
    async fn get_by_id(&self, id: &UserId) -> Result<UserRecord, RepositoryError>;

    /// Remove and return a record. Fails with [`RepositoryError::NotFound`]
    /// for unknown or already-deleted ids.
    async fn delete_by_id(&self, id: &UserId) -> Result<UserRecord, RepositoryError>;

    /// Check that the backend is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Open the user store selected by configuration.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if `PostgreSQL` is configured but
/// cannot be reached or its schema cannot be applied.
pub async fn open_user_store(config: &ServerConfig) -> Result<Arc<dyn UserStore>, RepositoryError> {
    let Some(database_url) = &config.database_url else {
        return Ok(Arc::new(MemoryUserStore::new()));
    };

    let pool = create_pool(database_url).await?;
    let store = PgUserStore::connect(pool).await?;
    Ok(Arc::new(store))
}
