//! Driving port for resource mutations.

use async_trait::async_trait;

use crate::domain::{CreateResourceRequest, Error, Resource, ResourceId, UpdateResourceRequest};

/// Write-side use cases exposed to inbound adapters.
///
/// Every mutation validates its input before touching the store, and
/// update/delete verify existence first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceCommand: Send + Sync {
    /// Validate and persist a new resource, returning the stored record.
    async fn create_resource(&self, request: CreateResourceRequest) -> Result<Resource, Error>;

    /// Merge a partial patch onto an existing resource and persist it.
    async fn update_resource(
        &self,
        id: &ResourceId,
        patch: UpdateResourceRequest,
    ) -> Result<Resource, Error>;

    /// Delete an existing resource.
    async fn delete_resource(&self, id: &ResourceId) -> Result<(), Error>;
}
