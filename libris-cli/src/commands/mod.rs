//! CLI command implementations

pub mod doctor;
pub mod logs;
pub mod session;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use libris_core::LibraryContext;

/// Resolve the data directory: `--dir` / `LIBRIS_DIR`, else the current directory
pub fn get_data_dir(dir: Option<&Path>) -> Result<PathBuf> {
    match dir {
        Some(dir) => Ok(dir.to_path_buf()),
        None => std::env::current_dir().context("Could not determine the current directory"),
    }
}

/// Load the library records from the data directory
pub fn get_context(dir: Option<&Path>) -> Result<LibraryContext> {
    let data_dir = get_data_dir(dir)?;
    LibraryContext::open(&data_dir)
        .with_context(|| format!("Failed to load library data from {}", data_dir.display()))
}
