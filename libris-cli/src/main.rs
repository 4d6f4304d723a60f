//! Libris CLI - library lending tracker in your terminal

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;
mod prompt;

use commands::{doctor, logs, session};

/// Libris - borrow and return books from a small library catalog
///
/// Run without a subcommand to log in and use the interactive menu.
#[derive(Parser)]
#[command(name = "libris", version, about, long_about = None)]
struct Cli {
    /// Directory holding users.txt, books.txt and transactions.txt
    #[arg(long, global = true, env = "LIBRIS_DIR")]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that book availability matches the loan records
    Doctor {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// View and manage the event log
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let dir = cli.dir.as_deref();
    match cli.command {
        None => session::run(dir),
        Some(Commands::Doctor { json }) => doctor::run(dir, json),
        Some(Commands::Logs { command }) => logs::run(dir, command).map(|()| ExitCode::SUCCESS),
    }
}
