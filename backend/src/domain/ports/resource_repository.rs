//! Driven port for resource persistence.
//!
//! Adapters provide the document-store half of the contract: they own id
//! and timestamp generation and pass store failures through unmodified.
//! No retries, no local recovery; that policy belongs to callers.

use async_trait::async_trait;
use pagination::PageWindow;

use crate::domain::{NewResource, Resource, ResourceChanges, ResourceFilter, ResourceId};

/// Errors raised by resource repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResourceRepositoryError {
    /// Store connection could not be established or was lost.
    #[error("resource repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("resource repository query failed: {message}")]
    Query { message: String },
}

impl ResourceRepositoryError {
    /// Connection-level failure.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Query-level failure.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Generic persistence gateway over the resource collection.
///
/// Absence is signalled through return values (`None`, `false`), never
/// through errors; the error type is reserved for store failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceRepository: Send + Sync {
    /// Fetch a resource by id. Returns `None` when the id is unknown.
    async fn find_by_id(
        &self,
        id: &ResourceId,
    ) -> Result<Option<Resource>, ResourceRepositoryError>;

    /// Persist a new resource. The store assigns the id and both
    /// timestamps and defaults `is_active` to `true`.
    async fn create(&self, data: NewResource) -> Result<Resource, ResourceRepositoryError>;

    /// Atomic find-and-modify. Returns the post-update resource, or
    /// `None` when the id does not exist (in which case nothing was
    /// written).
    async fn update(
        &self,
        id: &ResourceId,
        changes: ResourceChanges,
    ) -> Result<Option<Resource>, ResourceRepositoryError>;

    /// Remove a resource, reporting whether a record was actually
    /// removed.
    async fn delete(&self, id: &ResourceId) -> Result<bool, ResourceRepositoryError>;

    /// Page through resources matching `filter`, newest first by
    /// creation time. A zero `limit` falls back to the default page
    /// size; the ordering is fixed, not configurable.
    async fn find_many_with_pagination(
        &self,
        filter: &ResourceFilter,
        window: PageWindow,
    ) -> Result<Vec<Resource>, ResourceRepositoryError>;

    /// Total number of resources matching `filter`, ignoring
    /// pagination.
    async fn count(&self, filter: &ResourceFilter) -> Result<u64, ResourceRepositoryError>;
}
