//! Logs command - view and manage the event log

use std::path::Path;

use anyhow::{anyhow, Result};
use chrono::{TimeZone, Utc};
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Confirm;
use libris_core::services::logging::now_ms;
use libris_core::LoggingService;

use super::get_data_dir;
use crate::output;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Upper bound for `--older-than-days`, about a thousand years
const MAX_RETENTION_DAYS: i64 = 365_000;

#[derive(Subcommand)]
pub enum LogsCommands {
    /// Show recent log entries
    List {
        /// Number of entries to show
        #[arg(short, long, default_value = "50")]
        limit: usize,
        /// Show only errors
        #[arg(long)]
        errors: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Clear old log entries
    Clear {
        /// Delete logs older than N days
        #[arg(
            long,
            default_value = "30",
            value_parser = clap::value_parser!(i64).range(0..=MAX_RETENTION_DAYS)
        )]
        older_than_days: i64,
        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show log statistics and database path
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn get_logging_service(dir: Option<&Path>) -> Result<LoggingService> {
    let data_dir = get_data_dir(dir)?;
    LoggingService::new(&data_dir, env!("CARGO_PKG_VERSION"))
}

/// Timestamp `days` days before `now`, `None` if it cannot be represented
fn cutoff_ms(now: i64, days: i64) -> Option<i64> {
    days.checked_mul(DAY_MS).and_then(|span| now.checked_sub(span))
}

fn format_timestamp(timestamp_ms: i64) -> String {
    Utc.timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| timestamp_ms.to_string())
}

pub fn run(dir: Option<&Path>, command: LogsCommands) -> Result<()> {
    match command {
        LogsCommands::List { limit, errors, json } => {
            let service = get_logging_service(dir)?;
            let entries = if errors {
                service.get_errors(limit)?
            } else {
                service.get_recent(limit)?
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
                return Ok(());
            }

            if entries.is_empty() {
                println!("No log entries found.");
                return Ok(());
            }

            let mut table = output::create_table();
            table.set_header(vec!["Time", "Event", "User", "Book", "Transaction", "Error"]);

            for entry in entries {
                table.add_row(vec![
                    format_timestamp(entry.timestamp),
                    entry.event,
                    entry.user_id.unwrap_or_default(),
                    entry.book_id.unwrap_or_default(),
                    entry.transaction_id.unwrap_or_default(),
                    entry.error_message.unwrap_or_default(),
                ]);
            }

            println!("{}", table);
        }
        LogsCommands::Clear {
            older_than_days,
            force,
            json,
        } => {
            let service = get_logging_service(dir)?;
            let cutoff = cutoff_ms(now_ms(), older_than_days)
                .ok_or_else(|| anyhow!("--older-than-days {} is out of range", older_than_days))?;

            if !force && !json {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Delete logs older than {} days?", older_than_days))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    println!("{}", "Cancelled.".dimmed());
                    return Ok(());
                }
            }

            let deleted = service.delete_before(cutoff)?;

            if json {
                println!("{}", serde_json::json!({ "deleted": deleted }));
            } else {
                output::success(&format!("Deleted {} log entries", deleted));
            }
        }
        LogsCommands::Stats { json } => {
            let service = get_logging_service(dir)?;
            let total = service.count()?;
            let errors = service.get_errors(1000)?.len();
            let db_path = service.db_path().to_path_buf();
            let size_bytes = std::fs::metadata(&db_path).map(|m| m.len()).unwrap_or(0);

            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "total_entries": total,
                        "error_count": errors,
                        "database_path": db_path.to_string_lossy(),
                        "database_size_bytes": size_bytes
                    })
                );
            } else {
                println!("{}", "Log Statistics".bold());
                println!("  Total entries: {}", total);
                println!("  Errors: {}", errors);
                println!("  Database: {}", db_path.display());
                println!("  Size: {} bytes", size_bytes);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(clap::Parser)]
    struct LogsCli {
        #[command(subcommand)]
        command: LogsCommands,
    }

    fn parse(args: &[&str]) -> std::result::Result<LogsCommands, clap::Error> {
        use clap::Parser;
        LogsCli::try_parse_from(std::iter::once("logs").chain(args.iter().copied()))
            .map(|cli| cli.command)
    }

    #[test]
    fn test_cutoff_is_days_before_now() {
        assert_eq!(cutoff_ms(10 * DAY_MS, 3), Some(7 * DAY_MS));
        assert_eq!(cutoff_ms(DAY_MS, 0), Some(DAY_MS));
        assert_eq!(cutoff_ms(0, i64::MAX), None);
        assert_eq!(cutoff_ms(i64::MIN, 1), None);
    }

    #[test]
    fn test_older_than_days_is_bounded() {
        assert!(matches!(
            parse(&["clear", "--older-than-days", "7"]),
            Ok(LogsCommands::Clear { older_than_days: 7, .. })
        ));
        assert!(parse(&["clear", "--older-than-days", "-1"]).is_err());
        assert!(parse(&["clear", "--older-than-days", "9223372036854775808"]).is_err());
        assert!(parse(&["clear", "--older-than-days", "365001"]).is_err());
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "1970-01-01 00:00:00");
        assert_eq!(format_timestamp(86_400_000), "1970-01-02 00:00:00");
    }
}
