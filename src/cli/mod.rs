//! Command-line interface
//!
//! Operational tooling for the service: run it, administer licenses, and
//! inspect the persisted documents. The interactive ticket surface itself
//! is bound through the library API by a platform adapter.

pub mod handlers;
pub mod output;

pub use output::OutputFormatter;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ticketry - guild support-ticket workflow service
#[derive(Parser)]
#[command(name = "ticketry", version, about, author)]
pub struct Cli {
    /// Settings file (defaults to ./ticketry.toml when present)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Override the data directory holding persisted documents
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Machine-readable JSON output
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the service: stores plus the liveness endpoint
    Serve {
        /// Liveness endpoint bind address (overrides settings)
        #[arg(long)]
        bind: Option<String>,
    },

    /// License administration
    License {
        #[command(subcommand)]
        command: LicenseCommands,
    },

    /// Show a guild's effective configuration
    Config {
        /// Guild id
        guild: u64,
    },

    /// Show a staff member's cumulative claim credits
    Credits {
        /// User id
        user: u64,
    },
}

#[derive(Subcommand)]
pub enum LicenseCommands {
    /// Grant or reset a guild's 30-day entitlement (owner only)
    Grant {
        /// Guild id
        guild: u64,
        /// Acting principal; defaults to the configured owner
        #[arg(long)]
        actor: Option<u64>,
    },

    /// Report a guild's license status
    Status {
        /// Guild id
        guild: u64,
    },
}
