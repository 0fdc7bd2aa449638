//! Driving port for resource reads.

use async_trait::async_trait;
use pagination::PageResponse;

use crate::domain::{Error, Resource, ResourceId, SearchResourcesRequest};

/// Read-side use cases exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceQuery: Send + Sync {
    /// Search resources with pagination and optional equality filters.
    ///
    /// The returned `totalRecords` is advisory: it is gathered
    /// concurrently with the page fetch and is not guaranteed to be
    /// consistent with it under concurrent writes.
    async fn search_resources(
        &self,
        request: SearchResourcesRequest,
    ) -> Result<PageResponse<Resource>, Error>;

    /// Fetch a single resource, failing with `not_found` when absent.
    async fn get_resource_by_id(&self, id: &ResourceId) -> Result<Resource, Error>;
}
