//! Service entry-point: wires the in-memory store, domain services, REST
//! endpoints, and OpenAPI docs.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use resource_service::domain::ResourceService;
use resource_service::inbound::http::health::HealthState;
use resource_service::inbound::http::state::HttpState;
use resource_service::outbound::persistence::InMemoryResourceRepository;
use resource_service::server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let repository = Arc::new(InMemoryResourceRepository::new());
    let service = Arc::new(ResourceService::new(repository));
    let http_state = HttpState::new(service.clone(), service);

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::from_env()?;
    let server = create_server(health_state, http_state, config)?;
    server.await
}
