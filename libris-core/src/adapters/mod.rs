//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - Comma-delimited flat files for the Repository port

pub mod flat_file;
