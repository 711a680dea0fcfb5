//! `PostgreSQL` user store.
//!
//! Queries are checked at runtime (`query_as`) so the crate builds without a
//! live database.

use async_trait::async_trait;
use sqlx::PgPool;

use stud_core::{Email, UserId};

use super::{RepositoryError, StoreBackend, UserStore};
use crate::models::user::{NewUser, UserRecord};

/// Idempotent DDL for the `users` table.
const SCHEMA: &str = include_str!("schema.sql");

/// Row shape shared by every `users` query.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: String,
    name: String,
    email: String,
}

impl TryFrom<UserRow> for UserRecord {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: UserId::new(row.id),
            name: row.name,
            email,
        })
    }
}

/// User store backed by `PostgreSQL`.
///
/// Email uniqueness is enforced by the unique index on `lower(email)`, so
/// concurrent writers on any number of instances cannot create duplicates.
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Wrap a pool and apply the schema.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the schema cannot be applied.
    pub async fn connect(pool: PgPool) -> Result<Self, RepositoryError> {
        sqlx::raw_sql(SCHEMA).execute(&pool).await?;
        tracing::info!("users schema ready");
        Ok(Self { pool })
    }
}

/// Map a unique violation to `Conflict`, anything else to `Database`.
fn conflict_or_database(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict("email already exists".to_owned());
    }
    RepositoryError::Database(e)
}

#[async_trait]
impl UserStore for PgUserStore {
    fn backend(&self) -> StoreBackend {
        StoreBackend::Postgres
    }

    async fn list(&self) -> Result<Vec<UserRecord>, RepositoryError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, name, email
            FROM users
            ORDER BY seq DESC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(UserRecord::try_from).collect()
    }

    async fn create(&self, new_user: NewUser) -> Result<UserRecord, RepositoryError> {
        let record = UserRecord::allocate(new_user);

        let row = sqlx::query_as::<_, UserRow>(
            r"
            INSERT INTO users (id, name, email)
            VALUES ($1, $2, $3)
            RETURNING id, name, email
            ",
        )
        .bind(&record.id)
        .bind(&record.name)
        .bind(&record.email)
        .fetch_one(&self.pool)
        .await
        .map_err(conflict_or_database)?;

        UserRecord::try_from(row)
    }

    async fn get_by_id(&self, id: &UserId) -> Result<UserRecord, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, name, email
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)?.try_into()
    }

    async fn delete_by_id(&self, id: &UserId) -> Result<UserRecord, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            DELETE FROM users
            WHERE id = $1
            RETURNING id, name, email
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)?.try_into()
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
