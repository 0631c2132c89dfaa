//! In-memory genity repository for tests and local experiments.

use crate::models::Genity;
use crate::services::repository::{GenityRepository, RepositoryError};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// Keeps genitys in an id-ordered map, matching the `ORDER BY id` of the
/// PostgreSQL repository.
#[derive(Default)]
pub struct InMemoryGenityRepository {
    items: RwLock<BTreeMap<String, Genity>>,
}

impl InMemoryGenityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: impl IntoIterator<Item = Genity>) -> Self {
        Self {
            items: RwLock::new(items.into_iter().map(|g| (g.id.clone(), g)).collect()),
        }
    }
}

#[async_trait]
impl GenityRepository for InMemoryGenityRepository {
    async fn get(&self, id: &str) -> Result<Genity, RepositoryError> {
        self.items
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        Ok(self.items.read().await.len() as i64)
    }

    async fn query(&self, offset: i64, limit: i64) -> Result<Vec<Genity>, RepositoryError> {
        let offset = usize::try_from(offset).unwrap_or(0);
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(self
            .items
            .read()
            .await
            .values()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn create(&self, genity: &Genity) -> Result<(), RepositoryError> {
        let mut items = self.items.write().await;
        if items.contains_key(&genity.id) {
            return Err(RepositoryError::Duplicate(genity.id.clone()));
        }
        items.insert(genity.id.clone(), genity.clone());
        Ok(())
    }

    async fn update(&self, genity: &Genity) -> Result<(), RepositoryError> {
        let mut items = self.items.write().await;
        match items.get_mut(&genity.id) {
            Some(existing) => {
                *existing = genity.clone();
                Ok(())
            }
            None => Err(RepositoryError::NotFound(genity.id.clone())),
        }
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        self.items
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn genity(id: &str) -> Genity {
        let now = Utc::now();
        Genity {
            id: id.to_string(),
            name: format!("genity {id}"),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn query_orders_by_id_and_honours_window() {
        let repo = InMemoryGenityRepository::with_items(["c", "a", "d", "b"].map(genity));

        let all = repo.query(0, 10).await.unwrap();
        let ids: Vec<&str> = all.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);

        let window = repo.query(1, 2).await.unwrap();
        let ids: Vec<&str> = window.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);

        assert!(repo.query(10, 5).await.unwrap().is_empty());
        assert!(repo.query(0, 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_store_returns_empty_sequence() {
        let repo = InMemoryGenityRepository::new();
        assert_eq!(repo.count().await.unwrap(), 0);
        assert!(repo.query(0, 100).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_rejects_duplicate_ids() {
        let repo = InMemoryGenityRepository::new();
        repo.create(&genity("a")).await.unwrap();

        let err = repo.create(&genity("a")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Duplicate(id) if id == "a"));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn missing_rows_surface_not_found() {
        let repo = InMemoryGenityRepository::new();

        assert!(matches!(
            repo.get("none").await,
            Err(RepositoryError::NotFound(_))
        ));
        assert!(matches!(
            repo.update(&genity("none")).await,
            Err(RepositoryError::NotFound(_))
        ));
        assert!(matches!(
            repo.delete("none").await,
            Err(RepositoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn delete_removes_row() {
        let repo = InMemoryGenityRepository::with_items([genity("a"), genity("b")]);
        repo.delete("a").await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 1);
        assert!(matches!(
            repo.delete("a").await,
            Err(RepositoryError::NotFound(_))
        ));
    }
}
