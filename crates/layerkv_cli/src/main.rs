//! LayerKV CLI
//!
//! Interactive shell over an in-memory LayerKV transaction stack.
//!
//! # Commands
//!
//! - `SET`, `GET`, `DELETE`, `EXISTS` - read and write keys
//! - `BEGIN`, `COMMIT`, `ROLLBACK` - nested transactions
//! - `DEPTH`, `STATS`, `HELP`, `EXIT`
//!
//! Nothing is persisted; the store lives as long as the process.

mod command;
mod error;
mod shell;

use clap::Parser;
use shell::Shell;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// In-memory key-value shell with nested transactions.
#[derive(Parser)]
#[command(name = "layerkv")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Read commands from this file instead of stdin
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Do not print a prompt
    #[arg(short, long)]
    quiet: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for command replies
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let stdout = io::stdout();
    let mut shell = Shell::new(stdout.lock());

    match cli.script {
        Some(path) => {
            info!("Running script {:?}", path);
            let file = File::open(&path)?;
            shell.run(BufReader::new(file), false)?;
        }
        None => {
            if !cli.quiet {
                println!("LayerKV v{} - type HELP for commands", layerkv_core::VERSION);
            }
            shell.run(io::stdin().lock(), !cli.quiet)?;
        }
    }

    debug!(stats = ?shell.stack().stats(), "session finished");
    Ok(())
}
