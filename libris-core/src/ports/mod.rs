//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The record store
//! and services depend only on these traits, not on concrete file formats.

mod repository;

pub use repository::Repository;
