//! Resource domain service.
//!
//! Implements the driving ports on top of a [`ResourceRepository`],
//! enforcing the business invariants the repository does not: validation
//! before every mutation, existence checks before update/delete, the
//! empty-patch rejection, and the explicit patch-merge semantics.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{PageResponse, convert};

use crate::domain::ports::{
    ResourceCommand, ResourceQuery, ResourceRepository, ResourceRepositoryError,
};
use crate::domain::validation::validate_request;
use crate::domain::{
    CreateResourceRequest, Error, NewResource, Resource, ResourceChanges, ResourceFilter,
    ResourceId, SearchResourcesRequest, UpdateResourceRequest,
};

/// Business-rule orchestration over a resource repository.
#[derive(Clone)]
pub struct ResourceService<R> {
    repository: Arc<R>,
}

impl<R> ResourceService<R> {
    /// Create a new service over the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> ResourceService<R>
where
    R: ResourceRepository,
{
    fn map_repository_error(error: ResourceRepositoryError) -> Error {
        match error {
            ResourceRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("resource repository unavailable: {message}"))
            }
            ResourceRepositoryError::Query { message } => {
                Error::internal(format!("resource repository error: {message}"))
            }
        }
    }

    /// Build the store filter from a search request. Absent fields are
    /// dropped here so the store is never asked to match an absent
    /// value.
    fn filter_from(request: &SearchResourcesRequest) -> ResourceFilter {
        ResourceFilter {
            name: request.name.clone(),
            is_active: request.is_active,
        }
    }

    /// Explicit field-by-field merge of a patch onto an existing record:
    /// patch fields win, everything else is retained.
    fn merge_patch(existing: &Resource, patch: &UpdateResourceRequest) -> ResourceChanges {
        ResourceChanges {
            name: patch
                .name
                .clone()
                .unwrap_or_else(|| existing.name.clone()),
            description: patch
                .description
                .clone()
                .or_else(|| existing.description.clone()),
            is_active: patch.is_active.unwrap_or(existing.is_active),
            updated_by: existing.updated_by.clone(),
        }
    }

    async fn find_existing(&self, id: &ResourceId) -> Result<Resource, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::not_found("resource not found"))
    }
}

#[async_trait]
impl<R> ResourceQuery for ResourceService<R>
where
    R: ResourceRepository,
{
    async fn search_resources(
        &self,
        request: SearchResourcesRequest,
    ) -> Result<PageResponse<Resource>, Error> {
        validate_request(&request)?;

        let window = convert(request.page, request.limit)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let filter = Self::filter_from(&request);

        // The page fetch and the count are independent reads; dispatch
        // both and join. Neither failure is silently ignored: the fetch
        // error is surfaced first, then the count error.
        let (items, total_records) = tokio::join!(
            self.repository.find_many_with_pagination(&filter, window),
            self.repository.count(&filter),
        );
        let items = items.map_err(Self::map_repository_error)?;
        let total_records = total_records.map_err(Self::map_repository_error)?;

        Ok(PageResponse::new(
            items,
            request.page,
            request.limit,
            total_records,
        ))
    }

    async fn get_resource_by_id(&self, id: &ResourceId) -> Result<Resource, Error> {
        self.find_existing(id).await
    }
}

#[async_trait]
impl<R> ResourceCommand for ResourceService<R>
where
    R: ResourceRepository,
{
    async fn create_resource(&self, request: CreateResourceRequest) -> Result<Resource, Error> {
        validate_request(&request)?;

        // Only the whitelisted fields reach the store.
        let data = NewResource {
            name: request.name,
            description: request.description,
        };
        self.repository
            .create(data)
            .await
            .map_err(Self::map_repository_error)
    }

    async fn update_resource(
        &self,
        id: &ResourceId,
        patch: UpdateResourceRequest,
    ) -> Result<Resource, Error> {
        if patch.is_empty() {
            return Err(Error::invalid_request("no data provided for update"));
        }
        validate_request(&patch)?;

        let existing = self.find_existing(id).await?;
        let changes = Self::merge_patch(&existing, &patch);

        let updated = self
            .repository
            .update(id, changes)
            .await
            .map_err(Self::map_repository_error)?;

        // The record was just confirmed to exist; a no-op update here is
        // a detectable inconsistency, not a plain not-found.
        updated.ok_or_else(|| Error::internal("failed to update resource"))
    }

    async fn delete_resource(&self, id: &ResourceId) -> Result<(), Error> {
        self.find_existing(id).await?;

        let removed = self
            .repository
            .delete(id)
            .await
            .map_err(Self::map_repository_error)?;

        if removed {
            Ok(())
        } else {
            Err(Error::internal("failed to delete resource"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockResourceRepository;
    use chrono::Utc;
    use pagination::PageWindow;

    fn make_service(repository: MockResourceRepository) -> ResourceService<MockResourceRepository> {
        ResourceService::new(Arc::new(repository))
    }

    fn stored_resource(name: &str) -> Resource {
        Resource {
            id: ResourceId::random(),
            name: name.to_owned(),
            description: Some("a description".to_owned()),
            is_active: true,
            created_by: None,
            updated_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn search_joins_page_and_count() {
        let mut repository = MockResourceRepository::new();
        repository
            .expect_find_many_with_pagination()
            .withf(|_, window| *window == PageWindow { skip: 0, limit: 2 })
            .times(1)
            .return_once(|_, _| Ok(vec![stored_resource("a"), stored_resource("b")]));
        repository
            .expect_count()
            .times(1)
            .return_once(|_| Ok(5));

        let service = make_service(repository);
        let request = SearchResourcesRequest {
            page: Some(1),
            limit: Some(2),
            ..SearchResourcesRequest::default()
        };

        let response = service.search_resources(request).await.expect("search succeeds");
        assert_eq!(response.items.len(), 2);
        assert_eq!(response.pagination.total_records, 5);
        assert_eq!(response.pagination.total_pages, 3);
        assert_eq!(response.pagination.page, 1);
        assert_eq!(response.pagination.limit, 2);
    }

    #[tokio::test]
    async fn search_strips_absent_filter_fields() {
        let mut repository = MockResourceRepository::new();
        repository
            .expect_find_many_with_pagination()
            .withf(|filter, _| filter.name.is_none() && filter.is_active == Some(true))
            .times(1)
            .return_once(|_, _| Ok(Vec::new()));
        repository
            .expect_count()
            .withf(|filter| filter.name.is_none() && filter.is_active == Some(true))
            .times(1)
            .return_once(|_| Ok(0));

        let service = make_service(repository);
        let request = SearchResourcesRequest {
            is_active: Some(true),
            ..SearchResourcesRequest::default()
        };

        let response = service.search_resources(request).await.expect("search succeeds");
        assert!(response.items.is_empty());
        assert_eq!(response.pagination.total_pages, 0);
    }

    #[tokio::test]
    async fn search_rejects_page_below_one_without_store_calls() {
        let mut repository = MockResourceRepository::new();
        repository.expect_find_many_with_pagination().times(0);
        repository.expect_count().times(0);

        let service = make_service(repository);
        let request = SearchResourcesRequest {
            page: Some(0),
            ..SearchResourcesRequest::default()
        };

        let error = service.search_resources(request).await.expect_err("rejected");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.message(), "page and limit must be greater than 0");
    }

    #[tokio::test]
    async fn search_surfaces_fetch_failure_even_when_count_succeeds() {
        let mut repository = MockResourceRepository::new();
        repository
            .expect_find_many_with_pagination()
            .times(1)
            .return_once(|_, _| Err(ResourceRepositoryError::query("boom")));
        repository.expect_count().times(1).return_once(|_| Ok(3));

        let service = make_service(repository);
        let error = service
            .search_resources(SearchResourcesRequest::default())
            .await
            .expect_err("fetch failure propagates");
        assert_eq!(error.code(), ErrorCode::InternalError);
    }

    #[tokio::test]
    async fn create_whitelists_name_and_description() {
        let mut repository = MockResourceRepository::new();
        repository
            .expect_create()
            .withf(|data| data.name == "widget" && data.description.as_deref() == Some("desc"))
            .times(1)
            .return_once(|data| {
                let mut resource = stored_resource(&data.name);
                resource.description = data.description;
                Ok(resource)
            });

        let service = make_service(repository);
        let request = CreateResourceRequest {
            name: "widget".to_owned(),
            description: Some("desc".to_owned()),
        };

        let resource = service.create_resource(request).await.expect("create succeeds");
        assert_eq!(resource.name, "widget");
        assert!(resource.is_active);
    }

    #[tokio::test]
    async fn create_rejects_invalid_name_without_store_calls() {
        let mut repository = MockResourceRepository::new();
        repository.expect_create().times(0);

        let service = make_service(repository);
        let request = CreateResourceRequest {
            name: String::new(),
            description: None,
        };

        let error = service.create_resource(request).await.expect_err("rejected");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.message(), "Validation failed");
    }

    #[tokio::test]
    async fn get_returns_not_found_for_unknown_id() {
        let mut repository = MockResourceRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .return_once(|_| Ok(None));

        let service = make_service(repository);
        let error = service
            .get_resource_by_id(&ResourceId::random())
            .await
            .expect_err("missing");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn update_rejects_empty_patch_without_store_calls() {
        let mut repository = MockResourceRepository::new();
        repository.expect_find_by_id().times(0);
        repository.expect_update().times(0);

        let service = make_service(repository);
        let error = service
            .update_resource(&ResourceId::random(), UpdateResourceRequest::default())
            .await
            .expect_err("empty patch rejected");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.message(), "no data provided for update");
    }

    #[tokio::test]
    async fn update_fails_with_not_found_for_unknown_id() {
        let mut repository = MockResourceRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .return_once(|_| Ok(None));
        repository.expect_update().times(0);

        let service = make_service(repository);
        let patch = UpdateResourceRequest {
            name: Some("x".to_owned()),
            ..UpdateResourceRequest::default()
        };
        let error = service
            .update_resource(&ResourceId::random(), patch)
            .await
            .expect_err("missing");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn update_merges_patch_fields_over_existing_ones() {
        let existing = stored_resource("old-name");
        let existing_for_mock = existing.clone();
        let mut repository = MockResourceRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(existing_for_mock)));
        repository
            .expect_update()
            .withf(|_, changes| {
                changes.name == "new-name"
                    && changes.description.as_deref() == Some("a description")
                    && changes.is_active
            })
            .times(1)
            .return_once(|_, changes| {
                let mut updated = stored_resource(&changes.name);
                updated.description = changes.description;
                Ok(Some(updated))
            });

        let service = make_service(repository);
        let patch = UpdateResourceRequest {
            name: Some("new-name".to_owned()),
            ..UpdateResourceRequest::default()
        };

        let updated = service
            .update_resource(&existing.id, patch)
            .await
            .expect("update succeeds");
        assert_eq!(updated.name, "new-name");
        assert_eq!(updated.description.as_deref(), Some("a description"));
    }

    #[tokio::test]
    async fn update_detects_record_vanishing_after_existence_check() {
        let existing = stored_resource("doomed");
        let existing_for_mock = existing.clone();
        let mut repository = MockResourceRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(existing_for_mock)));
        repository
            .expect_update()
            .times(1)
            .return_once(|_, _| Ok(None));

        let service = make_service(repository);
        let patch = UpdateResourceRequest {
            is_active: Some(false),
            ..UpdateResourceRequest::default()
        };
        let error = service
            .update_resource(&existing.id, patch)
            .await
            .expect_err("vanished record detected");
        assert_eq!(error.code(), ErrorCode::InternalError);
    }

    #[tokio::test]
    async fn delete_fails_with_not_found_for_unknown_id() {
        let mut repository = MockResourceRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .return_once(|_| Ok(None));
        repository.expect_delete().times(0);

        let service = make_service(repository);
        let error = service
            .delete_resource(&ResourceId::random())
            .await
            .expect_err("missing");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn delete_detects_noop_after_existence_check() {
        let existing = stored_resource("doomed");
        let existing_for_mock = existing.clone();
        let mut repository = MockResourceRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(existing_for_mock)));
        repository
            .expect_delete()
            .times(1)
            .return_once(|_| Ok(false));

        let service = make_service(repository);
        let error = service
            .delete_resource(&existing.id)
            .await
            .expect_err("noop delete detected");
        assert_eq!(error.code(), ErrorCode::InternalError);
        assert_eq!(error.message(), "failed to delete resource");
    }

    #[tokio::test]
    async fn connection_failures_surface_as_service_unavailable() {
        let mut repository = MockResourceRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .return_once(|_| Err(ResourceRepositoryError::connection("store down")));

        let service = make_service(repository);
        let error = service
            .get_resource_by_id(&ResourceId::random())
            .await
            .expect_err("unavailable");
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }
}
