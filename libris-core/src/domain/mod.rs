//! Core domain entities
//!
//! Pure data structures for the catalog, the credential list and the loan
//! ledger. No I/O happens here.

mod book;
mod transaction;
mod user;
pub mod result;

pub use book::{ids_match, Book};
pub use transaction::{Transaction, TransactionId, TRANSACTION_ID_TAG};
pub use user::{Role, User, ADMIN_ROLE};
