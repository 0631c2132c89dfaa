//! PostgreSQL-backed genity repository.

use crate::config::DatabaseConfig;
use crate::models::Genity;
use crate::services::repository::{GenityRepository, RepositoryError};
use async_trait::async_trait;
use metrics::histogram;
use secrecy::ExposeSecret;
use service_core::error::AppError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::{Duration, Instant};
use tracing::{info, instrument};

const DB_QUERY_DURATION: &str = "genity_db_query_duration_seconds";

/// Records how long a storage operation took, labelled by operation.
struct QueryTimer {
    operation: &'static str,
    start: Instant,
}

impl QueryTimer {
    fn start(operation: &'static str) -> Self {
        Self {
            operation,
            start: Instant::now(),
        }
    }

    fn observe_duration(self) {
        histogram!(DB_QUERY_DURATION, "operation" => self.operation)
            .record(self.start.elapsed().as_secs_f64());
    }
}

#[derive(Clone)]
pub struct PgGenityRepository {
    pool: PgPool,
}

impl PgGenityRepository {
    /// Create a new connection pool.
    #[instrument(skip(config), fields(service = "genity-service"))]
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        info!(
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(config.url.expose_secret())
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("PostgreSQL connection pool established");

        Ok(Self::new(pool))
    }

    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GenityRepository for PgGenityRepository {
    #[instrument(skip(self))]
    async fn get(&self, id: &str) -> Result<Genity, RepositoryError> {
        let timer = QueryTimer::start("get");

        let genity = sqlx::query_as::<_, Genity>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM genity
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        timer.observe_duration();

        genity.ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    async fn count(&self) -> Result<i64, RepositoryError> {
        let timer = QueryTimer::start("count");

        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM genity")
            .fetch_one(&self.pool)
            .await?;

        timer.observe_duration();

        Ok(count)
    }

    #[instrument(skip(self))]
    async fn query(&self, offset: i64, limit: i64) -> Result<Vec<Genity>, RepositoryError> {
        let timer = QueryTimer::start("query");

        let genitys = sqlx::query_as::<_, Genity>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM genity
            ORDER BY id
            OFFSET $1
            LIMIT $2
            "#,
        )
        .bind(offset.max(0))
        .bind(limit.max(0))
        .fetch_all(&self.pool)
        .await?;

        timer.observe_duration();

        Ok(genitys)
    }

    #[instrument(skip(self, genity), fields(genity_id = %genity.id))]
    async fn create(&self, genity: &Genity) -> Result<(), RepositoryError> {
        let timer = QueryTimer::start("create");

        sqlx::query(
            r#"
            INSERT INTO genity (id, name, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&genity.id)
        .bind(&genity.name)
        .bind(genity.created_at)
        .bind(genity.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                RepositoryError::Duplicate(genity.id.clone())
            }
            _ => RepositoryError::Storage(e),
        })?;

        timer.observe_duration();

        Ok(())
    }

    #[instrument(skip(self, genity), fields(genity_id = %genity.id))]
    async fn update(&self, genity: &Genity) -> Result<(), RepositoryError> {
        let timer = QueryTimer::start("update");

        let result = sqlx::query(
            r#"
            UPDATE genity
            SET name = $2, created_at = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(&genity.id)
        .bind(&genity.name)
        .bind(genity.created_at)
        .bind(genity.updated_at)
        .execute(&self.pool)
        .await?;

        timer.observe_duration();

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(genity.id.clone()));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let genity = self.get(id).await?;

        let timer = QueryTimer::start("delete");

        sqlx::query("DELETE FROM genity WHERE id = $1")
            .bind(&genity.id)
            .execute(&self.pool)
            .await?;

        timer.observe_duration();

        Ok(())
    }
}
