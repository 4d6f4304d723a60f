//! Flat file repository implementation
//!
//! Reads and writes the legacy comma-delimited record files:
//!
//! - `users.txt`: `id,name,password,role`
//! - `books.txt`: `id,title,author,available`
//! - `transactions.txt`: `transactionId,userId,bookId,dateBorrowed,dateReturned`
//!
//! There is no header row and no quoting or escaping: a field containing a
//! comma cannot be represented. Extra trailing fields are ignored on read.

use std::fs::File;
use std::path::PathBuf;

use chrono::NaiveDate;
use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, WriterBuilder};

use crate::domain::result::{Error, Result};
use crate::domain::{Book, Transaction, TransactionId, User};
use crate::ports::Repository;

pub const USERS_FILE: &str = "users.txt";
pub const BOOKS_FILE: &str = "books.txt";
pub const TRANSACTIONS_FILE: &str = "transactions.txt";

/// Literal stored in the return date column of an open loan
pub const OPEN_LOAN_SENTINEL: &str = "null";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Repository over a directory of flat record files
pub struct FlatFileRepository {
    data_dir: PathBuf,
}

impl FlatFileRepository {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn path(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }

    /// Read every non-blank line of a record file, checking the field count
    fn read_records(&self, file: &str, min_fields: usize) -> Result<Vec<(u64, StringRecord)>> {
        let path = self.path(file);
        let handle = File::open(&path).map_err(|e| {
            std::io::Error::new(e.kind(), format!("{}: {}", path.display(), e))
        })?;

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(handle);

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            if record.len() == 1 && record.get(0) == Some("") {
                continue;
            }
            if record.len() < min_fields {
                return Err(Error::format(
                    file,
                    line,
                    format!("expected {} fields, found {}", min_fields, record.len()),
                ));
            }
            records.push((line, record));
        }

        Ok(records)
    }

    fn write_records<I>(&self, file: &str, rows: I) -> Result<()>
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .quote_style(QuoteStyle::Never)
            .terminator(Terminator::Any(b'\n'))
            .from_path(self.path(file))?;

        for row in rows {
            writer.write_record(&row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl Repository for FlatFileRepository {
    fn load_users(&self) -> Result<Vec<User>> {
        self.read_records(USERS_FILE, 4)?
            .into_iter()
            .map(|(_, r)| {
                Ok(User::new(
                    field(&r, 0),
                    field(&r, 1),
                    field(&r, 2),
                    field(&r, 3),
                ))
            })
            .collect()
    }

    fn load_books(&self) -> Result<Vec<Book>> {
        self.read_records(BOOKS_FILE, 4)?
            .into_iter()
            .map(|(_, r)| {
                Ok(Book::new(
                    field(&r, 0),
                    field(&r, 1),
                    field(&r, 2),
                    parse_available(field(&r, 3)),
                ))
            })
            .collect()
    }

    fn save_books(&self, books: &[Book]) -> Result<()> {
        self.write_records(
            BOOKS_FILE,
            books.iter().map(|b| {
                vec![
                    b.id.clone(),
                    b.title.clone(),
                    b.author.clone(),
                    b.available.to_string(),
                ]
            }),
        )
    }

    fn load_transactions(&self) -> Result<Vec<Transaction>> {
        self.read_records(TRANSACTIONS_FILE, 5)?
            .into_iter()
            .map(|(line, r)| -> Result<Transaction> {
                let borrowed_on = parse_date(field(&r, 3))
                    .ok_or_else(|| bad_date(line, field(&r, 3)))?;
                let returned_on = match field(&r, 4) {
                    OPEN_LOAN_SENTINEL => None,
                    text => Some(parse_date(text).ok_or_else(|| bad_date(line, text))?),
                };

                Ok(Transaction {
                    id: TransactionId::parse(field(&r, 0)),
                    user_id: field(&r, 1).to_string(),
                    book_id: field(&r, 2).to_string(),
                    borrowed_on,
                    returned_on,
                })
            })
            .collect()
    }

    fn save_transactions(&self, transactions: &[Transaction]) -> Result<()> {
        self.write_records(
            TRANSACTIONS_FILE,
            transactions.iter().map(|t| {
                vec![
                    t.id.to_string(),
                    t.user_id.clone(),
                    t.book_id.clone(),
                    format_date(t.borrowed_on),
                    t.returned_on
                        .map(format_date)
                        .unwrap_or_else(|| OPEN_LOAN_SENTINEL.to_string()),
                ]
            }),
        )
    }
}

fn field(record: &StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or("")
}

/// Anything other than `true` (any case) reads as not available
fn parse_available(text: &str) -> bool {
    text.eq_ignore_ascii_case("true")
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn bad_date(line: u64, text: &str) -> Error {
    Error::format(TRANSACTIONS_FILE, line, format!("invalid date '{}'", text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_load_users() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(USERS_FILE),
            "U1,alice,secret,admin\nU2,bob,pw,member\n",
        )
        .unwrap();

        let users = FlatFileRepository::new(dir.path()).load_users().unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].name, "alice");
        assert!(users[0].is_administrator());
        assert!(!users[1].is_administrator());
    }

    #[test]
    fn test_load_books_parses_availability() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(BOOKS_FILE),
            "B1,Dune,Frank Herbert,true\n\
             B2,Emma,Jane Austen,false\n\
             B3,Ulysses,James Joyce,TRUE\n\
             B4,Beloved,Toni Morrison,yes\n",
        )
        .unwrap();

        let books = FlatFileRepository::new(dir.path()).load_books().unwrap();
        let flags: Vec<bool> = books.iter().map(|b| b.available).collect();
        assert_eq!(flags, vec![true, false, true, false]);
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(BOOKS_FILE),
            "B1,Dune,Frank Herbert,true,extra\n",
        )
        .unwrap();

        let books = FlatFileRepository::new(dir.path()).load_books().unwrap();
        assert_eq!(books[0], Book::new("B1", "Dune", "Frank Herbert", true));
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(BOOKS_FILE),
            "B1,Dune,Frank Herbert,true\n\nB2,Emma,Jane Austen,true\n",
        )
        .unwrap();

        let books = FlatFileRepository::new(dir.path()).load_books().unwrap();
        assert_eq!(books.len(), 2);
    }

    #[test]
    fn test_short_record_is_format_error() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(BOOKS_FILE),
            "B1,Dune,Frank Herbert,true\nB2,Emma\n",
        )
        .unwrap();

        let err = FlatFileRepository::new(dir.path()).load_books().unwrap_err();
        match err {
            Error::Format { file, line, .. } => {
                assert_eq!(file, BOOKS_FILE);
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = FlatFileRepository::new(dir.path()).load_users().unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains(USERS_FILE));
    }

    #[test]
    fn test_transactions_sentinel_and_dates() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(TRANSACTIONS_FILE),
            "T001,U1,B1,2024-01-05,2024-01-20\nT002,U2,B2,2024-02-01,null\n",
        )
        .unwrap();

        let txs = FlatFileRepository::new(dir.path()).load_transactions().unwrap();
        assert_eq!(txs[0].returned_on, Some(date(2024, 1, 20)));
        assert_eq!(txs[1].returned_on, None);
        assert_eq!(txs[1].borrowed_on, date(2024, 2, 1));
        assert_eq!(txs[1].id.sequence(), Some(2));
    }

    #[test]
    fn test_invalid_date_is_format_error() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(TRANSACTIONS_FILE),
            "T001,U1,B1,yesterday,null\n",
        )
        .unwrap();

        let err = FlatFileRepository::new(dir.path()).load_transactions().unwrap_err();
        assert!(err.to_string().contains("invalid date 'yesterday'"));
    }

    #[test]
    fn test_save_writes_legacy_format() {
        let dir = tempdir().unwrap();
        let repo = FlatFileRepository::new(dir.path());

        repo.save_books(&[
            Book::new("B1", "Dune", "Frank Herbert", false),
            Book::new("B2", "Emma", "Jane Austen", true),
        ])
        .unwrap();
        repo.save_transactions(&[Transaction::open(
            TransactionId::from_sequence(1),
            "U1",
            "B1",
            date(2024, 3, 9),
        )])
        .unwrap();

        let books = std::fs::read_to_string(dir.path().join(BOOKS_FILE)).unwrap();
        assert_eq!(books, "B1,Dune,Frank Herbert,false\nB2,Emma,Jane Austen,true\n");

        let txs = std::fs::read_to_string(dir.path().join(TRANSACTIONS_FILE)).unwrap();
        assert_eq!(txs, "T001,U1,B1,2024-03-09,null\n");
    }

    #[test]
    fn test_empty_ledger_saves_empty_file() {
        let dir = tempdir().unwrap();
        let repo = FlatFileRepository::new(dir.path());

        repo.save_transactions(&[]).unwrap();

        let txs = std::fs::read_to_string(dir.path().join(TRANSACTIONS_FILE)).unwrap();
        assert!(txs.is_empty());
        assert!(repo.load_transactions().unwrap().is_empty());
    }
}
