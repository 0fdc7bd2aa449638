//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ResourceCommand, ResourceQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub resources_query: Arc<dyn ResourceQuery>,
    pub resources_command: Arc<dyn ResourceCommand>,
}

impl HttpState {
    /// Construct state from the resource use-case ports.
    #[must_use]
    pub fn new(
        resources_query: Arc<dyn ResourceQuery>,
        resources_command: Arc<dyn ResourceCommand>,
    ) -> Self {
        Self {
            resources_query,
            resources_command,
        }
    }
}
