//! Record store - the in-memory catalog, credential list and loan ledger
//!
//! Loaded once at startup and written once at shutdown. Records are only
//! ever appended, so storage order is load order followed by new entries.
//! All lookups are linear scans; the data sets are small.

use crate::domain::result::{Error, Result};
use crate::domain::{Book, Transaction, TransactionId, User};
use crate::ports::Repository;

#[derive(Debug, Clone)]
pub struct RecordStore {
    users: Vec<User>,
    books: Vec<Book>,
    transactions: Vec<Transaction>,
    /// `None` once the numeric id space is used up
    next_sequence: Option<u64>,
}

impl RecordStore {
    /// Build a store from already loaded sequences
    ///
    /// The transaction counter resumes above both the ledger length and the
    /// highest numbered id, so an id is never handed out twice. A ledger that
    /// already holds `T18446744073709551615` leaves no id to allocate.
    pub fn new(users: Vec<User>, books: Vec<Book>, transactions: Vec<Transaction>) -> Self {
        let highest = transactions
            .iter()
            .filter_map(|t| t.id.sequence())
            .max()
            .unwrap_or(0);
        let next_sequence = highest.max(transactions.len() as u64).checked_add(1);

        Self {
            users,
            books,
            transactions,
            next_sequence,
        }
    }

    /// Load all three sequences in file order
    pub fn load(repository: &impl Repository) -> Result<Self> {
        let users = repository.load_users()?;
        let books = repository.load_books()?;
        let transactions = repository.load_transactions()?;
        Ok(Self::new(users, books, transactions))
    }

    /// Write books, then transactions. The credential list is never rewritten.
    pub fn save(&self, repository: &impl Repository) -> Result<()> {
        repository.save_books(&self.books)?;
        repository.save_transactions(&self.transactions)?;
        Ok(())
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// First book whose id matches ignoring case. O(n).
    pub fn find_book(&self, book_id: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.has_id(book_id))
    }

    pub(crate) fn find_book_index(&self, book_id: &str) -> Option<usize> {
        self.books.iter().position(|b| b.has_id(book_id))
    }

    pub(crate) fn book_mut(&mut self, index: usize) -> Option<&mut Book> {
        self.books.get_mut(index)
    }

    pub(crate) fn transaction_mut(&mut self, index: usize) -> Option<&mut Transaction> {
        self.transactions.get_mut(index)
    }

    /// Take the next transaction id. Ids are strictly increasing.
    pub(crate) fn allocate_transaction_id(&mut self) -> Result<TransactionId> {
        let sequence = self.next_sequence.ok_or_else(|| {
            Error::InconsistentState("no transaction ids left to allocate".to_string())
        })?;
        self.next_sequence = sequence.checked_add(1);
        Ok(TransactionId::from_sequence(sequence))
    }

    pub(crate) fn push_transaction(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }
}
