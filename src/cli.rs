use std::path::PathBuf;

use clap::{Parser, Subcommand};
use deckhand::RoleFilter;

/// Deckhand - deployment configuration and ad hoc remote tasks
#[derive(Parser, Debug)]
#[command(name = "deckhand")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to deploy.toml (default: ./deploy.toml, ./config/deploy.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format for CI (one JSON object per line)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report uptime of every selected host
    Uptime {
        /// Roles to select (comma-separated, or "all")
        #[arg(short, long, default_value = "all")]
        roles: RoleFilter,

        /// Visit hosts concurrently (output stays in configuration order)
        #[arg(short, long)]
        parallel: bool,
    },

    /// Run an ad hoc command on every selected host
    Run {
        /// Roles to select (comma-separated, or "all")
        #[arg(short, long, default_value = "all")]
        roles: RoleFilter,

        /// Visit hosts concurrently (output stays in configuration order)
        #[arg(short, long)]
        parallel: bool,

        /// Command to run remotely
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// List configured hosts and their roles
    Hosts {
        /// Roles to select (comma-separated, or "all")
        #[arg(short, long, default_value = "all")]
        roles: RoleFilter,
    },

    /// Validate the deployment configuration
    Check,
}
