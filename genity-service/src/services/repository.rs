//! Storage capability for genity records.

use crate::models::Genity;
use async_trait::async_trait;
use service_core::error::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("genity '{0}' not found")]
    NotFound(String),

    #[error("genity '{0}' already exists")]
    Duplicate(String),

    #[error("storage failure: {0}")]
    Storage(#[from] sqlx::Error),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(_) => {
                AppError::NotFound(anyhow::anyhow!("The requested resource was not found."))
            }
            other => AppError::DatabaseError(anyhow::Error::new(other)),
        }
    }
}

/// Keyed access to the `genity` table.
///
/// Every call is a single storage round trip; dropping the returned future
/// cancels it.
#[async_trait]
pub trait GenityRepository: Send + Sync {
    /// Returns the genity with `id`, or `NotFound`.
    async fn get(&self, id: &str) -> Result<Genity, RepositoryError>;

    /// Total number of genitys.
    async fn count(&self) -> Result<i64, RepositoryError>;

    /// Genitys ordered by id ascending, skipping `offset`, at most `limit`.
    async fn query(&self, offset: i64, limit: i64) -> Result<Vec<Genity>, RepositoryError>;

    /// Inserts a fully populated genity.
    async fn create(&self, genity: &Genity) -> Result<(), RepositoryError>;

    /// Overwrites the row matching `genity.id`; `NotFound` if there is none.
    async fn update(&self, genity: &Genity) -> Result<(), RepositoryError>;

    /// Removes the row with `id`; `NotFound` if there is none.
    async fn delete(&self, id: &str) -> Result<(), RepositoryError>;
}
