//! Doctor command - check the catalog against the loan records

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use comfy_table::{Cell, Color};
use libris_core::services::AuditIssue;

use super::get_context;
use crate::output;

fn issue_kind(issue: &AuditIssue) -> &'static str {
    match issue {
        AuditIssue::BorrowedWithoutLoan { .. } => "borrowed_without_loan",
        AuditIssue::AvailableWithOpenLoan { .. } => "available_with_open_loan",
        AuditIssue::MultipleOpenLoans { .. } => "multiple_open_loans",
        AuditIssue::UnknownBook { .. } => "unknown_book",
    }
}

pub fn run(dir: Option<&Path>, json: bool) -> Result<ExitCode> {
    let ctx = get_context(dir)?;
    let report = ctx.audit();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(if report.is_clean() { ExitCode::SUCCESS } else { ExitCode::FAILURE });
    }

    println!("{}", "Library Records Check".bold());
    println!(
        "Checked {} book(s) and {} transaction(s)",
        report.books_checked, report.transactions_checked
    );
    println!();

    if report.is_clean() {
        output::success("Catalog availability matches the loan records");
        return Ok(ExitCode::SUCCESS);
    }

    let mut table = output::create_table();
    table.set_header(vec!["Check", "Status", "Message"]);
    for issue in &report.issues {
        table.add_row(vec![
            Cell::new(issue_kind(issue)),
            Cell::new("ERROR").fg(Color::Red),
            Cell::new(issue.message()),
        ]);
    }
    println!("{}", table);
    println!();
    output::error(&format!("{} issue(s) found", report.issues.len()));

    Ok(ExitCode::FAILURE)
}
