//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer (resources, health)
//! - **Schemas**: Domain request/response types that already derive
//!   `ToSchema`
//!
//! The generated specification is served by Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::domain::{CreateResourceRequest, Error, ErrorCode, Resource, UpdateResourceRequest};
use crate::inbound::http::resources::DeletedResourceResponse;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Resource service API",
        description = "HTTP interface for resource CRUD, search, and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::resources::search_resources,
        crate::inbound::http::resources::create_resource,
        crate::inbound::http::resources::get_resource,
        crate::inbound::http::resources::update_resource,
        crate::inbound::http::resources::delete_resource,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Resource,
        CreateResourceRequest,
        UpdateResourceRequest,
        DeletedResourceResponse,
        Error,
        ErrorCode
    )),
    tags(
        (name = "resources", description = "Operations on resources"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
