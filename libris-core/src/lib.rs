//! Libris Core - lending logic for a small library
//!
//! This crate follows a hexagonal layout:
//!
//! - **domain**: Book, User, Transaction and the error type
//! - **ports**: the Repository trait for the record files
//! - **adapters**: the flat comma-delimited file implementation
//! - **store**: the in-memory record sequences
//! - **services**: lending, access control, audit and event logging

pub mod adapters;
pub mod config;
pub mod domain;
mod log_migrations;
pub mod ports;
pub mod services;
pub mod store;

use std::path::Path;

use adapters::flat_file::FlatFileRepository;
use config::Config;
use services::*;
use store::RecordStore;

// Re-export commonly used types at crate root
pub use domain::result::{Error, Result};
pub use domain::{Book, Role, Transaction, TransactionId, User};
pub use services::{AuditReport, LogEvent, LoggingService, Session};

/// Main context for a library session
///
/// Holds the configuration, the record files, the loaded records and the
/// optional event log. Services borrow the store from here.
pub struct LibraryContext {
    pub config: Config,
    pub repository: FlatFileRepository,
    pub store: RecordStore,
    pub logger: Option<LoggingService>,
}

impl LibraryContext {
    /// Load configuration and all three record files from `data_dir`
    ///
    /// The event log is opened on a best-effort basis: if it cannot be
    /// opened the session runs without it.
    pub fn open(data_dir: &Path) -> Result<Self> {
        let config = Config::load(data_dir)?;
        let repository = FlatFileRepository::new(data_dir);
        let store = RecordStore::load(&repository)?;

        let logger = if config.event_log {
            LoggingService::new(data_dir, env!("CARGO_PKG_VERSION")).ok()
        } else {
            None
        };

        Ok(Self {
            config,
            repository,
            store,
            logger,
        })
    }

    pub fn access(&self) -> AccessService<'_> {
        AccessService::new(self.store.users())
    }

    pub fn lending(&mut self) -> LendingService<'_> {
        LendingService::new(&mut self.store)
    }

    pub fn audit(&self) -> AuditReport {
        AuditService::new(&self.store).run()
    }

    /// Write books and transactions back to their files
    pub fn save(&self) -> Result<()> {
        self.store.save(&self.repository)
    }

    /// Record an event, ignoring failures (logging never breaks a session)
    pub fn log(&self, event: LogEvent) {
        if let Some(logger) = &self.logger {
            let _ = logger.log(event);
        }
    }
}
