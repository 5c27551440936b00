//! Tombstone CLI
//!
//! Command-line tools for a block directory's tombstone file.
//!
//! # Commands
//!
//! - `inspect` - Display file size and tombstone counts
//! - `verify` - Verify magic number, checksum and payload
//! - `dump` - Print every deletion interval
//! - `truncate` - Drop intervals that end before a timestamp
//! - `delete` - Remove all tombstones of some series

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Tombstone file tools.
#[derive(Parser)]
#[command(name = "tombstone")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the block directory
    #[arg(global = true, short, long)]
    path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display tombstone file statistics
    Inspect {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Verify tombstone file integrity
    Verify,

    /// Print every deletion interval
    Dump {
        /// Only print these series
        #[arg(short, long)]
        series: Vec<u64>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Drop intervals that end before a timestamp
    Truncate {
        /// Intervals with maxt below this timestamp are dropped
        #[arg(short, long, allow_hyphen_values = true)]
        before: i64,

        /// Dry run - show what would be done
        #[arg(short, long)]
        dry_run: bool,
    },

    /// Remove all tombstones of the given series
    Delete {
        /// Series references to clear
        #[arg(short, long, required = true)]
        series: Vec<u64>,

        /// Dry run - show what would be done
        #[arg(short, long)]
        dry_run: bool,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Inspect { format } => {
            let path = cli.path.ok_or("Block path required for inspect")?;
            commands::inspect::run(&path, &format)?;
        }
        Commands::Verify => {
            let path = cli.path.ok_or("Block path required for verify")?;
            commands::verify::run(&path)?;
        }
        Commands::Dump { series, format } => {
            let path = cli.path.ok_or("Block path required for dump")?;
            commands::dump::run(&path, &series, &format)?;
        }
        Commands::Truncate { before, dry_run } => {
            let path = cli.path.ok_or("Block path required for truncate")?;
            commands::rewrite::truncate(&path, before, dry_run)?;
        }
        Commands::Delete { series, dry_run } => {
            let path = cli.path.ok_or("Block path required for delete")?;
            commands::rewrite::delete(&path, &series, dry_run)?;
        }
        Commands::Version => {
            println!("Tombstone CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("Tombstone Core v{}", tombstone_core::VERSION);
        }
    }

    Ok(())
}
