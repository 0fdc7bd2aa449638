//! In-memory document-store adapter for the `ResourceRepository` port.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use pagination::{DEFAULT_LIMIT, PageWindow};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::ports::{ResourceRepository, ResourceRepositoryError};
use crate::domain::{NewResource, Resource, ResourceChanges, ResourceFilter, ResourceId};

/// Process-local implementation of the resource repository.
///
/// The map owns whole records; ids and timestamps are assigned here, the
/// way a document store would assign them. Never fails, so the error
/// half of the port contract is exercised only by tests and future
/// store-backed adapters.
#[derive(Debug, Default)]
pub struct InMemoryResourceRepository {
    records: RwLock<HashMap<Uuid, Resource>>,
}

impl InMemoryResourceRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn to_index(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

#[async_trait]
impl ResourceRepository for InMemoryResourceRepository {
    async fn find_by_id(
        &self,
        id: &ResourceId,
    ) -> Result<Option<Resource>, ResourceRepositoryError> {
        Ok(self.records.read().await.get(id.as_uuid()).cloned())
    }

    async fn create(&self, data: NewResource) -> Result<Resource, ResourceRepositoryError> {
        let now = Utc::now();
        let resource = Resource {
            id: ResourceId::random(),
            name: data.name,
            description: data.description,
            is_active: true,
            created_by: None,
            updated_by: None,
            created_at: now,
            updated_at: now,
        };
        self.records
            .write()
            .await
            .insert(*resource.id.as_uuid(), resource.clone());
        Ok(resource)
    }

    async fn update(
        &self,
        id: &ResourceId,
        changes: ResourceChanges,
    ) -> Result<Option<Resource>, ResourceRepositoryError> {
        let mut records = self.records.write().await;
        let Some(existing) = records.get_mut(id.as_uuid()) else {
            return Ok(None);
        };
        existing.name = changes.name;
        existing.description = changes.description;
        existing.is_active = changes.is_active;
        existing.updated_by = changes.updated_by;
        existing.updated_at = Utc::now();
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: &ResourceId) -> Result<bool, ResourceRepositoryError> {
        Ok(self.records.write().await.remove(id.as_uuid()).is_some())
    }

    async fn find_many_with_pagination(
        &self,
        filter: &ResourceFilter,
        window: PageWindow,
    ) -> Result<Vec<Resource>, ResourceRepositoryError> {
        let limit = if window.limit == 0 {
            DEFAULT_LIMIT
        } else {
            window.limit
        };

        let records = self.records.read().await;
        let mut matching: Vec<Resource> = records
            .values()
            .filter(|resource| filter.matches(resource))
            .cloned()
            .collect();
        // Fixed ordering: newest first by creation time.
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(matching
            .into_iter()
            .skip(to_index(window.skip))
            .take(to_index(limit))
            .collect())
    }

    async fn count(&self, filter: &ResourceFilter) -> Result<u64, ResourceRepositoryError> {
        let records = self.records.read().await;
        let matching = records
            .values()
            .filter(|resource| filter.matches(resource))
            .count();
        Ok(matching as u64)
    }
}
