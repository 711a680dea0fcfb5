//! In-process user store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use stud_core::UserId;

use super::{RepositoryError, StoreBackend, UserStore};
use crate::models::user::{NewUser, UserRecord};

/// User store kept in process memory.
///
/// Records are held in creation order. Not durable and not shared between
/// instances; use [`super::PgUserStore`] for that.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    records: RwLock<Vec<UserRecord>>,
}

impl MemoryUserStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    fn backend(&self) -> StoreBackend {
        StoreBackend::Memory
    }

    async fn list(&self) -> Result<Vec<UserRecord>, RepositoryError> {
        let records = self.records.read().await;
        Ok(records.iter().rev().cloned().collect())
    }

    async fn create(&self, new_user: NewUser) -> Result<UserRecord, RepositoryError> {
        // Check and insert under one write guard.
        let mut records = self.records.write().await;

        if records
            .iter()
            .any(|existing| existing.email.eq_ignore_case(&new_user.email))
        {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }

        let record = UserRecord::allocate(new_user);
        records.push(record.clone());
        Ok(record)
    }

    async fn get_by_id(&self, id: &UserId) -> Result<UserRecord, RepositoryError> {
        let records = self.records.read().await;
        records
            .iter()
            .find(|record| &record.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn delete_by_id(&self, id: &UserId) -> Result<UserRecord, RepositoryError> {
        let mut records = self.records.write().await;
        let position = records
            .iter()
            .position(|record| &record.id == id)
            .ok_or(RepositoryError::NotFound)?;
        Ok(records.remove(position))
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}
