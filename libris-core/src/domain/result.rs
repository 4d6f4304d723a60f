//! Result and error types for the core library

use thiserror::Error;

/// Core library error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Book not found: {0}")]
    NotFound(String),

    #[error("Book not available: {0}")]
    Unavailable(String),

    #[error("No matching borrow record found for book {0}")]
    NoOpenLoan(String),

    #[error("Inconsistent state: {0}")]
    InconsistentState(String),

    #[error("{file}:{line}: {message}")]
    Format {
        file: String,
        line: u64,
        message: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Create a not found error
    pub fn not_found(book_id: impl Into<String>) -> Self {
        Self::NotFound(book_id.into())
    }

    /// Create an unavailable error
    pub fn unavailable(book_id: impl Into<String>) -> Self {
        Self::Unavailable(book_id.into())
    }

    /// Create a no open loan error
    pub fn no_open_loan(book_id: impl Into<String>) -> Self {
        Self::NoOpenLoan(book_id.into())
    }

    /// Create a record format error for a line in a record file
    pub fn format(file: impl Into<String>, line: u64, message: impl Into<String>) -> Self {
        Self::Format {
            file: file.into(),
            line,
            message: message.into(),
        }
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_names_file_and_line() {
        let err = Error::format("books.txt", 3, "expected 4 fields, found 2");
        assert_eq!(err.to_string(), "books.txt:3: expected 4 fields, found 2");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "users.txt");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("IO error"));
    }
}
