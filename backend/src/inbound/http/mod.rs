//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod resources;
pub mod state;

pub use error::ApiResult;
