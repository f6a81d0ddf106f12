//! Repository ports - Where signups and generation records end up

use async_trait::async_trait;

use crate::domain::entities::{GenerationRecord, WaitlistEntry};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Datastore credential is not configured")]
    NotConfigured,
    #[error("Database error: {0}")]
    Database(String),
}

/// Append-only store for waitlist signups.
///
/// There is no deduplication: inserting the same person twice yields two rows.
#[async_trait]
pub trait WaitlistRepositoryPort: Send + Sync {
    async fn insert(&self, entry: &WaitlistEntry) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait GenerationRecordRepositoryPort: Send + Sync {
    async fn insert(&self, record: &GenerationRecord) -> Result<(), RepositoryError>;
}
