//! CLI command definitions and dispatch for the `facegate` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod recap;
pub mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Face-recognition attendance and login service.
#[derive(Parser)]
#[command(name = "facegate", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans via OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Address to bind.
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on.
        #[arg(long, default_value_t = 5000)]
        port: u16,
    },

    /// Print the monthly attendance recap.
    Recap {
        /// Month (1-12).
        #[arg(long)]
        month: u32,

        /// Calendar year.
        #[arg(long)]
        year: i32,

        /// Restrict the recap to one employee NIP.
        #[arg(long)]
        nip: Option<String>,

        /// Write the recap to a CSV file instead of printing a table.
        #[arg(long, value_name = "PATH")]
        csv: Option<PathBuf>,
    },

    /// Show service status: employee counts, enrollment, attendance volume.
    Status,

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}
