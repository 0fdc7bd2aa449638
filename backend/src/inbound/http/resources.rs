//! Resource API handlers.
//!
//! ```text
//! GET    /api/v1/resources?page=1&limit=10&name=widget&isActive=true
//! POST   /api/v1/resources {"name":"widget","description":"..."}
//! GET    /api/v1/resources/{id}
//! PATCH  /api/v1/resources/{id} {"name":"renamed"}
//! DELETE /api/v1/resources/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{
    CreateResourceRequest, Error, Resource, ResourceId, SearchResourcesRequest,
    UpdateResourceRequest,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Body returned by `DELETE /api/v1/resources/{id}`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletedResourceResponse {
    pub id: ResourceId,
}

fn parse_resource_id(raw: &str) -> Result<ResourceId, Error> {
    ResourceId::new(raw).map_err(|err| Error::invalid_request(err.to_string()))
}

/// Register the resource handlers on a service config.
pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.service(search_resources)
        .service(create_resource)
        .service(get_resource)
        .service(update_resource)
        .service(delete_resource);
}

/// Search resources with optional filters and pagination.
#[utoipa::path(
    get,
    path = "/api/v1/resources",
    params(SearchResourcesRequest),
    responses(
        (status = 200, description = "Page of matching resources"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Resource store unavailable", body = Error)
    ),
    tags = ["resources"],
    operation_id = "searchResources"
)]
#[get("/resources")]
pub async fn search_resources(
    state: web::Data<HttpState>,
    query: web::Query<SearchResourcesRequest>,
) -> ApiResult<HttpResponse> {
    let page = state
        .resources_query
        .search_resources(query.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(page))
}

/// Create a resource from a validated request body.
#[utoipa::path(
    post,
    path = "/api/v1/resources",
    request_body = CreateResourceRequest,
    responses(
        (status = 201, description = "Created resource", body = Resource),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Resource store unavailable", body = Error)
    ),
    tags = ["resources"],
    operation_id = "createResource"
)]
#[post("/resources")]
pub async fn create_resource(
    state: web::Data<HttpState>,
    payload: web::Json<CreateResourceRequest>,
) -> ApiResult<HttpResponse> {
    let resource = state
        .resources_command
        .create_resource(payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(resource))
}

/// Fetch one resource by identifier.
#[utoipa::path(
    get,
    path = "/api/v1/resources/{id}",
    params(("id" = String, Path, description = "Resource identifier (UUID)")),
    responses(
        (status = 200, description = "Resource", body = Resource),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Resource not found", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Resource store unavailable", body = Error)
    ),
    tags = ["resources"],
    operation_id = "getResourceById"
)]
#[get("/resources/{id}")]
pub async fn get_resource(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_resource_id(&path)?;
    let resource = state.resources_query.get_resource_by_id(&id).await?;
    Ok(HttpResponse::Ok().json(resource))
}

/// Apply a partial update to an existing resource.
#[utoipa::path(
    patch,
    path = "/api/v1/resources/{id}",
    params(("id" = String, Path, description = "Resource identifier (UUID)")),
    request_body = UpdateResourceRequest,
    responses(
        (status = 200, description = "Updated resource", body = Resource),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Resource not found", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Resource store unavailable", body = Error)
    ),
    tags = ["resources"],
    operation_id = "updateResource"
)]
#[patch("/resources/{id}")]
pub async fn update_resource(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateResourceRequest>,
) -> ApiResult<HttpResponse> {
    let id = parse_resource_id(&path)?;
    let resource = state
        .resources_command
        .update_resource(&id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(resource))
}

/// Delete a resource, returning the identifier that was removed.
#[utoipa::path(
    delete,
    path = "/api/v1/resources/{id}",
    params(("id" = String, Path, description = "Resource identifier (UUID)")),
    responses(
        (status = 200, description = "Deleted resource id", body = DeletedResourceResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Resource not found", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Resource store unavailable", body = Error)
    ),
    tags = ["resources"],
    operation_id = "deleteResource"
)]
#[delete("/resources/{id}")]
pub async fn delete_resource(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_resource_id(&path)?;
    state.resources_command.delete_resource(&id).await?;
    Ok(HttpResponse::Ok().json(DeletedResourceResponse { id }))
}
