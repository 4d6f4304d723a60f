//! Service layer - business logic orchestration
//!
//! Services operate on the record store. Each one covers a single area:
//! lending, credential checks, consistency audits and the event log.

pub mod access;
mod audit;
mod lending;
pub mod logging;

pub use access::{AccessService, Session};
pub use audit::{AuditIssue, AuditReport, AuditService};
pub use lending::LendingService;
pub use logging::{LogEntry, LogEvent, LoggingService};
