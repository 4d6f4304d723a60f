//! Audit service - ledger and catalog consistency checks
//!
//! Availability flags are stored, not derived, so data edited by hand (or
//! written by an older build) can drift away from the ledger. The audit
//! reports drift; it never repairs it.

use serde::Serialize;

use crate::domain::ids_match;
use crate::store::RecordStore;

/// One divergence between the catalog and the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuditIssue {
    /// Book marked out, but no open loan references it
    BorrowedWithoutLoan { book_id: String },
    /// Book marked available while an open loan references it
    AvailableWithOpenLoan {
        book_id: String,
        transaction_id: String,
    },
    /// More than one open loan for the same book
    MultipleOpenLoans { book_id: String, count: usize },
    /// Ledger entry for a book missing from the catalog
    UnknownBook {
        transaction_id: String,
        book_id: String,
    },
}

impl AuditIssue {
    pub fn message(&self) -> String {
        match self {
            AuditIssue::BorrowedWithoutLoan { book_id } => {
                format!("Book {} is marked borrowed but has no open loan", book_id)
            }
            AuditIssue::AvailableWithOpenLoan {
                book_id,
                transaction_id,
            } => format!(
                "Book {} is marked available but loan {} is still open",
                book_id, transaction_id
            ),
            AuditIssue::MultipleOpenLoans { book_id, count } => {
                format!("Book {} has {} open loans", book_id, count)
            }
            AuditIssue::UnknownBook {
                transaction_id,
                book_id,
            } => format!(
                "Loan {} references book {} which is not in the catalog",
                transaction_id, book_id
            ),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub books_checked: usize,
    pub transactions_checked: usize,
    pub issues: Vec<AuditIssue>,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Audit service over a loaded record store
pub struct AuditService<'a> {
    store: &'a RecordStore,
}

impl<'a> AuditService<'a> {
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    /// Run all checks
    pub fn run(&self) -> AuditReport {
        let books = self.store.books();
        let transactions = self.store.transactions();
        let mut issues = Vec::new();

        for book in books {
            let open: Vec<_> = transactions
                .iter()
                .filter(|t| t.is_open() && ids_match(&t.book_id, &book.id))
                .collect();

            match (book.available, open.first()) {
                (false, None) => issues.push(AuditIssue::BorrowedWithoutLoan {
                    book_id: book.id.clone(),
                }),
                (true, Some(tx)) => issues.push(AuditIssue::AvailableWithOpenLoan {
                    book_id: book.id.clone(),
                    transaction_id: tx.id.to_string(),
                }),
                _ => {}
            }

            if open.len() > 1 {
                issues.push(AuditIssue::MultipleOpenLoans {
                    book_id: book.id.clone(),
                    count: open.len(),
                });
            }
        }

        for tx in transactions {
            if self.store.find_book(&tx.book_id).is_none() {
                issues.push(AuditIssue::UnknownBook {
                    transaction_id: tx.id.to_string(),
                    book_id: tx.book_id.clone(),
                });
            }
        }

        AuditReport {
            books_checked: books.len(),
            transactions_checked: transactions.len(),
            issues,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Book, Transaction, TransactionId};
    use chrono::NaiveDate;

    fn open_tx(id: &str, book_id: &str) -> Transaction {
        Transaction::open(
            TransactionId::parse(id),
            "U1",
            book_id,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
    }

    #[test]
    fn test_consistent_store_is_clean() {
        let store = RecordStore::new(
            vec![],
            vec![
                Book::new("B1", "Dune", "Frank Herbert", false),
                Book::new("B2", "Emma", "Jane Austen", true),
            ],
            vec![open_tx("T001", "b1")],
        );
        let report = AuditService::new(&store).run();
        assert!(report.is_clean(), "{:?}", report.issues);
        assert_eq!(report.books_checked, 2);
        assert_eq!(report.transactions_checked, 1);
    }

    #[test]
    fn test_detects_each_kind_of_drift() {
        let store = RecordStore::new(
            vec![],
            vec![
                Book::new("B1", "Dune", "Frank Herbert", false),
                Book::new("B2", "Emma", "Jane Austen", true),
                Book::new("B3", "Ulysses", "James Joyce", false),
            ],
            vec![
                open_tx("T001", "B2"),
                open_tx("T002", "B3"),
                open_tx("T003", "B3"),
                open_tx("T004", "B9"),
            ],
        );

        let issues = AuditService::new(&store).run().issues;
        assert!(issues.contains(&AuditIssue::BorrowedWithoutLoan {
            book_id: "B1".to_string()
        }));
        assert!(issues.contains(&AuditIssue::AvailableWithOpenLoan {
            book_id: "B2".to_string(),
            transaction_id: "T001".to_string()
        }));
        assert!(issues.contains(&AuditIssue::MultipleOpenLoans {
            book_id: "B3".to_string(),
            count: 2
        }));
        assert!(issues.contains(&AuditIssue::UnknownBook {
            transaction_id: "T004".to_string(),
            book_id: "B9".to_string()
        }));
        assert_eq!(issues.len(), 4);
    }

    #[test]
    fn test_issue_messages() {
        let issue = AuditIssue::MultipleOpenLoans {
            book_id: "B3".to_string(),
            count: 2,
        };
        assert_eq!(issue.message(), "Book B3 has 2 open loans");
    }
}
