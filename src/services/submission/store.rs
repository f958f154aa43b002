use crate::domain::record::ContactRecord;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid store target: {0}")]
    InvalidTarget(String),
    #[error("Record {0} already exists")]
    Conflict(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Durable persistence for contact records.
#[async_trait]
pub trait RecordStore: Send + Sync + std::fmt::Debug {
    /// Inserts a record into `target`. There is no existence check and no update path.
    ///
    /// # Errors
    /// Returns `StoreError::InvalidTarget` if `target` cannot name a table.
    /// Returns `StoreError::Conflict` if a record with the same id already exists.
    async fn put(&self, target: &str, record: &ContactRecord) -> Result<(), StoreError>;

    /// Checks that the store is reachable.
    ///
    /// # Errors
    /// Returns `StoreError` if the store cannot be reached.
    async fn ping(&self) -> Result<(), StoreError>;
}
