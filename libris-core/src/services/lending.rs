//! Lending service - borrow and return
//!
//! Owns the link between a book's availability flag and the open
//! transactions in the ledger. Availability is never re-derived from the
//! ledger, so every successful operation updates both together and a failed
//! operation changes neither.

use crate::domain::result::{Error, Result};
use crate::domain::{ids_match, Book, Transaction};
use crate::services::access::Session;
use crate::store::RecordStore;

/// Lending service over a mutable record store
pub struct LendingService<'a> {
    store: &'a mut RecordStore,
}

impl<'a> LendingService<'a> {
    pub fn new(store: &'a mut RecordStore) -> Self {
        Self { store }
    }

    /// Lend a book to the session user
    ///
    /// Fails with `NotFound` for an unknown id and `Unavailable` when the
    /// book is already out. On success one book flips to unavailable and one
    /// open transaction is appended.
    pub fn borrow(&mut self, session: &Session, book_id: &str) -> Result<Transaction> {
        let index = self
            .store
            .find_book_index(book_id)
            .ok_or_else(|| Error::not_found(book_id))?;

        let canonical_id = match self.store.books().get(index) {
            Some(book) if !book.available => return Err(Error::unavailable(&book.id)),
            Some(book) => book.id.clone(),
            None => return Err(Error::not_found(book_id)),
        };

        let id = self.store.allocate_transaction_id()?;
        let transaction = Transaction::open(id, session.user_id(), canonical_id, session.date);

        if let Some(book) = self.store.book_mut(index) {
            book.available = false;
        }
        self.store.push_transaction(transaction.clone());

        Ok(transaction)
    }

    /// Close the session user's oldest open loan of a book
    ///
    /// Matches the user id exactly and the book id ignoring case. Fails with
    /// `NoOpenLoan` when the user holds no such loan.
    pub fn return_book(&mut self, session: &Session, book_id: &str) -> Result<Transaction> {
        let tx_index = self
            .store
            .transactions()
            .iter()
            .position(|t| {
                t.user_id == session.user_id() && ids_match(&t.book_id, book_id) && t.is_open()
            })
            .ok_or_else(|| Error::no_open_loan(book_id))?;

        // Locate the book before touching anything
        let book_index = self.store.find_book_index(book_id).ok_or_else(|| {
            Error::InconsistentState(format!(
                "open loan for book {} but the book is not in the catalog",
                book_id
            ))
        })?;

        let closed = match self.store.transaction_mut(tx_index) {
            Some(tx) => {
                tx.returned_on = Some(session.date);
                tx.clone()
            }
            None => {
                return Err(Error::InconsistentState(format!(
                    "transaction index {} out of range",
                    tx_index
                )))
            }
        };
        if let Some(book) = self.store.book_mut(book_index) {
            book.available = true;
        }

        Ok(closed)
    }

    /// Whole catalog in storage order
    pub fn list_books(&self) -> &[Book] {
        self.store.books()
    }

    /// Whole ledger in storage order
    ///
    /// Restricting this to administrators is up to the caller.
    pub fn list_transactions(&self) -> &[Transaction] {
        self.store.transactions()
    }

    /// Open loans held by one user, oldest first
    pub fn loans_for(&self, user_id: &str) -> Vec<&Transaction> {
        self.store
            .transactions()
            .iter()
            .filter(|t| t.user_id == user_id && t.is_open())
            .collect()
    }
}
