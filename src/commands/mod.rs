//! Command handlers for the `deckhand` binary

pub mod check;
pub mod hosts;
pub mod task;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use deckhand::config::{self, Config, ConfigWarning};
use deckhand::presentation::init_logging;

/// Flags shared by every subcommand
#[derive(Debug, Clone, Copy)]
pub struct Globals<'a> {
    pub config: Option<&'a Path>,
    pub json: bool,
    pub verbose: u8,
}

/// A configuration file with env overrides applied
pub struct Loaded {
    pub config: Config,
    pub path: PathBuf,
    pub warnings: Vec<ConfigWarning>,
}

/// Resolve, read and parse the configuration (no validation)
pub fn load(globals: &Globals<'_>) -> Result<Loaded> {
    let cwd = std::env::current_dir().context("failed to read working directory")?;
    let path = config::resolve_config_path(globals.config, &cwd);
    let (config, warnings) = config::load_with_warnings(&path)?;
    Ok(Loaded {
        config: config::with_env_overrides(config),
        path,
        warnings,
    })
}

/// Load and validate the configuration, then start logging and surface warnings
pub fn prepare(globals: &Globals<'_>) -> Result<Loaded> {
    let loaded = load(globals)?;
    loaded
        .config
        .validate()
        .with_context(|| format!("invalid configuration {}", loaded.path.display()))?;

    init_logging(globals.verbose, loaded.config.log_level);
    for warning in &loaded.warnings {
        warn!("{}", warning);
    }
    debug!(path = %loaded.path.display(), servers = loaded.config.servers.len(), "configuration loaded");

    Ok(loaded)
}
