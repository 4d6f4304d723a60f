//! Repository port - record file abstraction

use crate::domain::result::Result;
use crate::domain::{Book, Transaction, User};

/// Backing storage for the three record sequences
///
/// Loads return records in stored order. Saves replace the whole stored
/// sequence with the given slice, in slice order. The credential list is
/// read-only, so there is no `save_users`.
pub trait Repository {
    // === Users ===

    /// Load the credential list
    fn load_users(&self) -> Result<Vec<User>>;

    // === Books ===

    /// Load the catalog
    fn load_books(&self) -> Result<Vec<Book>>;

    /// Replace the stored catalog
    fn save_books(&self, books: &[Book]) -> Result<()>;

    // === Transactions ===

    /// Load the loan ledger
    fn load_transactions(&self) -> Result<Vec<Transaction>>;

    /// Replace the stored loan ledger
    fn save_transactions(&self, transactions: &[Transaction]) -> Result<()>;
}
