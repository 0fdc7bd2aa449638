//! Domain ports for the hexagonal boundary.
//!
//! `ResourceRepository` is the driven port the persistence adapter
//! implements; `ResourceQuery` and `ResourceCommand` are the driving
//! ports the HTTP adapter consumes.

mod resource_command;
mod resource_query;
mod resource_repository;

#[cfg(test)]
pub use resource_command::MockResourceCommand;
pub use resource_command::ResourceCommand;
#[cfg(test)]
pub use resource_query::MockResourceQuery;
pub use resource_query::ResourceQuery;
#[cfg(test)]
pub use resource_repository::MockResourceRepository;
pub use resource_repository::{ResourceRepository, ResourceRepositoryError};
