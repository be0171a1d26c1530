//! Deckhand CLI - deployment configuration and ad hoc remote tasks
//!
//! Usage: deckhand <COMMAND>
//!
//! Commands:
//!   uptime  Report uptime of every selected host
//!   run     Run an ad hoc command on every selected host
//!   hosts   List configured hosts and their roles
//!   check   Validate the deployment configuration

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use commands::Globals;
use deckhand::Task;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let globals = Globals {
        config: cli.config.as_deref(),
        json: cli.json,
        verbose: cli.verbose,
    };

    match cli.command {
        Commands::Uptime { roles, parallel } => {
            commands::task::cmd_task(Task::uptime(), &roles, parallel, &globals)
        }
        Commands::Run {
            roles,
            parallel,
            command,
        } => commands::task::cmd_task(Task::ad_hoc(&command), &roles, parallel, &globals),
        Commands::Hosts { roles } => commands::hosts::cmd_hosts(&roles, &globals),
        Commands::Check => commands::check::cmd_check(&globals),
    }
}
