//! Transaction (loan ledger) domain model

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fixed tag in front of every generated transaction id
pub const TRANSACTION_ID_TAG: char = 'T';

/// Ledger identifier such as `T007`
///
/// Ids read from disk are kept verbatim, so a hand-edited ledger with
/// foreign ids still saves back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Build the id for a sequence number, zero-padded to three digits
    pub fn from_sequence(sequence: u64) -> Self {
        Self(format!("{}{:03}", TRANSACTION_ID_TAG, sequence))
    }

    pub fn parse(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Numeric part of a generated id, `None` for ids in any other shape
    pub fn sequence(&self) -> Option<u64> {
        let digits = self.0.strip_prefix(TRANSACTION_ID_TAG)?;
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One borrow of one book by one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub user_id: String,
    pub book_id: String,
    pub borrowed_on: NaiveDate,
    /// `None` while the book is still out
    pub returned_on: Option<NaiveDate>,
}

impl Transaction {
    /// Create an open transaction
    pub fn open(
        id: TransactionId,
        user_id: impl Into<String>,
        book_id: impl Into<String>,
        borrowed_on: NaiveDate,
    ) -> Self {
        Self {
            id,
            user_id: user_id.into(),
            book_id: book_id.into(),
            borrowed_on,
            returned_on: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.returned_on.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_padding() {
        assert_eq!(TransactionId::from_sequence(1).as_str(), "T001");
        assert_eq!(TransactionId::from_sequence(42).as_str(), "T042");
        assert_eq!(TransactionId::from_sequence(1000).as_str(), "T1000");
    }

    #[test]
    fn test_sequence_extraction() {
        assert_eq!(TransactionId::parse("T007").sequence(), Some(7));
        assert_eq!(TransactionId::parse("T1234").sequence(), Some(1234));
        assert_eq!(TransactionId::parse("X007").sequence(), None);
        assert_eq!(TransactionId::parse("T").sequence(), None);
        assert_eq!(TransactionId::parse("T-12").sequence(), None);
    }

    #[test]
    fn test_open_transaction() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut tx = Transaction::open(TransactionId::from_sequence(1), "U1", "B1", date);
        assert!(tx.is_open());
        tx.returned_on = Some(date);
        assert!(!tx.is_open());
    }
}
