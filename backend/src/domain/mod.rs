//! Domain types and services for the resource core.
//!
//! Everything in here is transport agnostic: entities and request types
//! are plain structs with documented invariants, validation is table
//! driven, and persistence is reached only through the ports.

pub mod error;
pub mod ports;
pub mod resource;
pub mod resource_service;
pub mod validation;

pub use self::error::{Error, ErrorCode};
pub use self::resource::{
    CreateResourceRequest, NewResource, Resource, ResourceChanges, ResourceFilter, ResourceId,
    ResourceIdError, SearchResourcesRequest, UpdateResourceRequest,
};
pub use self::resource_service::ResourceService;
pub use self::validation::{FieldError, validate_request};
