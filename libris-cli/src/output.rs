//! Output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Color, ContentArrangement, Table};
use libris_core::{Book, Transaction, User};

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn books_table(books: &[Book]) -> Table {
    let mut table = create_table();
    table.set_header(vec!["ID", "Title", "Author", "Status"]);
    for book in books {
        let status = if book.available {
            Cell::new("Available").fg(Color::Green)
        } else {
            Cell::new("Borrowed").fg(Color::Yellow)
        };
        table.add_row(vec![
            Cell::new(&book.id),
            Cell::new(&book.title),
            Cell::new(&book.author),
            status,
        ]);
    }
    table
}

/// Users without their passwords
pub fn users_table(users: &[User]) -> Table {
    let mut table = create_table();
    table.set_header(vec!["ID", "Name", "Role"]);
    for user in users {
        table.add_row(vec![&user.id, &user.name, &user.role_text]);
    }
    table
}

pub fn transactions_table(transactions: &[Transaction]) -> Table {
    let mut table = create_table();
    table.set_header(vec!["ID", "User", "Book", "Borrowed", "Returned"]);
    for tx in transactions {
        let returned = match tx.returned_on {
            Some(date) => Cell::new(date.format("%Y-%m-%d")),
            None => Cell::new("Not returned").fg(Color::Yellow),
        };
        table.add_row(vec![
            Cell::new(&tx.id),
            Cell::new(&tx.user_id),
            Cell::new(&tx.book_id),
            Cell::new(tx.borrowed_on.format("%Y-%m-%d")),
            returned,
        ]);
    }
    table
}
