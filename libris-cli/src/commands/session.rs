//! Session command - login and the interactive lending menu

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use colored::Colorize;
use libris_core::{Error, LibraryContext, LogEvent, Session};

use super::get_data_dir;
use crate::output;
use crate::prompt::{self, Prompt};

/// How an interactive session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// User chose Exit; records were saved (or the save failure reported)
    Exited,
    /// Login attempts exhausted; nothing was saved
    LockedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    ViewBooks,
    Borrow,
    Return,
    ManageUsers,
    ManageBooks,
    ViewTransactions,
    Exit,
}

impl MenuAction {
    /// Menu numbering differs by role: Exit is 4 for ordinary users, 7 for admins
    fn parse(choice: &str, admin: bool) -> Option<Self> {
        match (choice, admin) {
            ("1", _) => Some(MenuAction::ViewBooks),
            ("2", _) => Some(MenuAction::Borrow),
            ("3", _) => Some(MenuAction::Return),
            ("4", false) => Some(MenuAction::Exit),
            ("4", true) => Some(MenuAction::ManageUsers),
            ("5", true) => Some(MenuAction::ManageBooks),
            ("6", true) => Some(MenuAction::ViewTransactions),
            ("7", true) => Some(MenuAction::Exit),
            _ => None,
        }
    }
}

const ORDINARY_MENU: &[&str] = &[
    "1. View All Books",
    "2. Borrow Book",
    "3. Return Book",
    "4. Exit",
];

const ADMIN_MENU: &[&str] = &[
    "1. View All Books",
    "2. Borrow Book",
    "3. Return Book",
    "4. Manage Users",
    "5. Manage Books",
    "6. View Transactions",
    "7. Exit",
];

pub fn run(dir: Option<&Path>) -> Result<ExitCode> {
    let data_dir = get_data_dir(dir)?;
    let mut ctx = match LibraryContext::open(&data_dir) {
        Ok(ctx) => ctx,
        Err(e) => {
            output::error(&format!("Error loading system: {}", e));
            return Ok(ExitCode::FAILURE);
        }
    };

    let report = ctx.audit();
    if !report.is_clean() {
        output::warning(&format!(
            "Warning: {} inconsistencies between the catalog and the loan records. Run `libris doctor` for details.",
            report.issues.len()
        ));
        ctx.log(
            LogEvent::new("audit_warning")
                .with_error(format!("{} issue(s)", report.issues.len())),
        );
    }

    let mut prompt = prompt::for_stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let today = Local::now().date_naive();

    match run_session(&mut ctx, prompt.as_mut(), &mut out, today)? {
        SessionEnd::Exited => Ok(ExitCode::SUCCESS),
        SessionEnd::LockedOut => Ok(ExitCode::FAILURE),
    }
}

/// Run one login plus menu session against loaded records
///
/// `today` is the date stamped on every borrow and return in the session.
pub fn run_session(
    ctx: &mut LibraryContext,
    prompt: &mut dyn Prompt,
    out: &mut dyn Write,
    today: NaiveDate,
) -> Result<SessionEnd> {
    writeln!(out, "{}", "Welcome to the Library Management System".bold())?;
    writeln!(out, "----------------------------------------")?;

    let Some(session) = login(ctx, prompt, out, today)? else {
        return Ok(SessionEnd::LockedOut);
    };

    menu(ctx, &session, prompt, out)?;
    Ok(SessionEnd::Exited)
}

fn login(
    ctx: &LibraryContext,
    prompt: &mut dyn Prompt,
    out: &mut dyn Write,
    today: NaiveDate,
) -> Result<Option<Session>> {
    let mut attempts = ctx.config.max_login_attempts;

    while attempts > 0 {
        let name = prompt.input("Username")?;
        let password = prompt.password("Password")?;

        match ctx.access().authenticate(&name, &password) {
            Ok(user) => {
                writeln!(
                    out,
                    "\n{}",
                    format!("Login successful! Welcome, {}.", user.name).green()
                )?;
                ctx.log(LogEvent::new("session_started").with_user(&user.id));
                return Ok(Some(Session::start(user, today)));
            }
            Err(Error::InvalidCredentials) => {
                attempts -= 1;
                ctx.log(LogEvent::new("login_failed"));
                writeln!(
                    out,
                    "{}",
                    format!("Invalid username or password. Attempts left: {}", attempts).red()
                )?;
            }
            Err(e) => return Err(e.into()),
        }
    }

    writeln!(out, "{}", "Too many failed attempts. Exiting...".red())?;
    ctx.log(LogEvent::new("login_locked_out"));
    Ok(None)
}

fn menu(
    ctx: &mut LibraryContext,
    session: &Session,
    prompt: &mut dyn Prompt,
    out: &mut dyn Write,
) -> Result<()> {
    let admin = session.is_administrator();
    let entries = if admin { ADMIN_MENU } else { ORDINARY_MENU };

    loop {
        writeln!(out, "\n{}", "----- MAIN MENU -----".bold())?;
        for entry in entries {
            writeln!(out, "{}", entry)?;
        }

        let choice = prompt.input("Enter choice")?;
        match MenuAction::parse(&choice, admin) {
            Some(MenuAction::ViewBooks) => view_books(ctx, out, "BOOK LIST")?,
            Some(MenuAction::Borrow) => borrow(ctx, session, prompt, out)?,
            Some(MenuAction::Return) => return_book(ctx, session, prompt, out)?,
            Some(MenuAction::ManageUsers) => {
                writeln!(out, "\n--- USERS ---")?;
                writeln!(out, "{}", output::users_table(ctx.store.users()))?;
            }
            Some(MenuAction::ManageBooks) => view_books(ctx, out, "BOOK MANAGEMENT")?,
            Some(MenuAction::ViewTransactions) => {
                writeln!(out, "\n--- TRANSACTIONS ---")?;
                writeln!(
                    out,
                    "{}",
                    output::transactions_table(ctx.lending().list_transactions())
                )?;
            }
            Some(MenuAction::Exit) => {
                save_all(ctx, session, out)?;
                return Ok(());
            }
            None => writeln!(out, "{}", "Invalid choice.".red())?,
        }
    }
}

fn view_books(ctx: &mut LibraryContext, out: &mut dyn Write, heading: &str) -> Result<()> {
    writeln!(out, "\n--- {} ---", heading)?;
    writeln!(out, "{}", output::books_table(ctx.lending().list_books()))?;
    Ok(())
}

fn borrow(
    ctx: &mut LibraryContext,
    session: &Session,
    prompt: &mut dyn Prompt,
    out: &mut dyn Write,
) -> Result<()> {
    let input = prompt.input("Enter Book ID")?;
    let book_id = input.trim();

    let result = ctx.lending().borrow(session, book_id);
    match result {
        Ok(tx) => {
            writeln!(
                out,
                "{}",
                format!("Book borrowed successfully! Transaction {}", tx.id).green()
            )?;
            ctx.log(
                LogEvent::new("book_borrowed")
                    .with_user(session.user_id())
                    .with_book(&tx.book_id)
                    .with_transaction(tx.id.as_str()),
            );
        }
        Err(e) => {
            writeln!(out, "{}", describe_error(&e).red())?;
            ctx.log(
                LogEvent::new("borrow_failed")
                    .with_user(session.user_id())
                    .with_book(book_id)
                    .with_error(e.to_string()),
            );
        }
    }
    Ok(())
}

fn return_book(
    ctx: &mut LibraryContext,
    session: &Session,
    prompt: &mut dyn Prompt,
    out: &mut dyn Write,
) -> Result<()> {
    let loans: Vec<String> = ctx
        .lending()
        .loans_for(session.user_id())
        .iter()
        .map(|t| format!("{} (since {})", t.book_id, t.borrowed_on))
        .collect();
    if !loans.is_empty() {
        writeln!(out, "Your open loans: {}", loans.join(", "))?;
    }

    let input = prompt.input("Enter Book ID to return")?;
    let book_id = input.trim();

    let result = ctx.lending().return_book(session, book_id);
    match result {
        Ok(tx) => {
            writeln!(out, "{}", "Book returned successfully!".green())?;
            ctx.log(
                LogEvent::new("book_returned")
                    .with_user(session.user_id())
                    .with_book(&tx.book_id)
                    .with_transaction(tx.id.as_str()),
            );
        }
        Err(e) => {
            writeln!(out, "{}", describe_error(&e).red())?;
            ctx.log(
                LogEvent::new("return_failed")
                    .with_user(session.user_id())
                    .with_book(book_id)
                    .with_error(e.to_string()),
            );
        }
    }
    Ok(())
}

/// Save failures are reported, never fatal
fn save_all(ctx: &LibraryContext, session: &Session, out: &mut dyn Write) -> Result<()> {
    match ctx.save() {
        Ok(()) => {
            writeln!(out, "{}", "All changes saved successfully. Goodbye!".green())?;
            ctx.log(LogEvent::new("records_saved").with_user(session.user_id()));
        }
        Err(e) => {
            writeln!(out, "{}", format!("Error saving files: {}", e).red())?;
            ctx.log(
                LogEvent::new("save_failed")
                    .with_user(session.user_id())
                    .with_error(e.to_string()),
            );
        }
    }
    Ok(())
}

/// One-line message for a failed lending operation
fn describe_error(e: &Error) -> String {
    match e {
        Error::NotFound(_) => "Book not found.".to_string(),
        Error::Unavailable(_) => "Book not available.".to_string(),
        Error::NoOpenLoan(_) => "No matching borrow record found.".to_string(),
        other => other.to_string(),
    }
}
