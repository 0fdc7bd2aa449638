//! Persistence adapters for the resource repository port.
//!
//! The document store itself is an external collaborator with its own
//! connection lifecycle; the adapter shipped here keeps records in
//! process memory while honouring the full repository contract
//! (store-assigned ids and timestamps, newest-first ordering, skip/limit
//! defaults).

mod in_memory_resource_repository;

pub use in_memory_resource_repository::InMemoryResourceRepository;
