//! Genity use cases: validation, identity and timestamp assignment, and one
//! repository call per operation.

use crate::dtos::{CreateGenityRequest, UpdateGenityRequest};
use crate::models::Genity;
use crate::services::repository::GenityRepository;
use chrono::{DateTime, SubsecRound, Utc};
use service_core::error::AppError;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

#[derive(Clone)]
pub struct GenityService {
    repo: Arc<dyn GenityRepository>,
}

/// Current time at the precision PostgreSQL `TIMESTAMPTZ` stores.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

impl GenityService {
    pub fn new(repo: Arc<dyn GenityRepository>) -> Self {
        Self { repo }
    }

    /// Returns the genity with the specified id.
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Genity, AppError> {
        Ok(self.repo.get(id).await?)
    }

    /// Returns the number of genitys.
    #[instrument(skip(self))]
    pub async fn count(&self) -> Result<i64, AppError> {
        Ok(self.repo.count().await?)
    }

    /// Returns the genitys within the given window, ordered by id.
    #[instrument(skip(self))]
    pub async fn query(&self, offset: i64, limit: i64) -> Result<Vec<Genity>, AppError> {
        Ok(self.repo.query(offset, limit).await?)
    }

    /// Creates a genity and returns it as stored.
    #[instrument(skip(self, request))]
    pub async fn create(&self, request: CreateGenityRequest) -> Result<Genity, AppError> {
        request.validate()?;

        let now = now();
        let genity = Genity {
            id: generate_id(),
            name: request.name,
            created_at: now,
            updated_at: now,
        };

        self.repo.create(&genity).await?;

        info!(genity_id = %genity.id, "Genity created");

        self.get(&genity.id).await
    }

    /// Replaces the name of an existing genity and refreshes `updated_at`.
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        id: &str,
        request: UpdateGenityRequest,
    ) -> Result<Genity, AppError> {
        request.validate()?;

        let mut genity = self.get(id).await?;
        genity.name = request.name;
        // Never move backwards, even if the wall clock does.
        genity.updated_at = now().max(genity.updated_at);

        self.repo.update(&genity).await?;

        info!(genity_id = %genity.id, "Genity updated");

        Ok(genity)
    }

    /// Deletes a genity and returns it as it was before deletion.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<Genity, AppError> {
        let genity = self.get(id).await?;

        self.repo.delete(id).await?;

        info!(genity_id = %genity.id, "Genity deleted");

        Ok(genity)
    }
}
