//! Check command handler
//!
//! Validates `deploy.toml` and prints a summary. Exits non-zero when the
//! configuration has problems; unknown keys are only warnings.

use std::io::{self, Write};

use anyhow::{bail, Result};

use deckhand::presentation::init_logging;
use deckhand::presentation::output::write_event;
use deckhand::DeckhandError;

use super::Globals;

pub fn cmd_check(globals: &Globals<'_>) -> Result<()> {
    let loaded = super::load(globals)?;
    init_logging(globals.verbose, loaded.config.log_level);

    let config = &loaded.config;
    let problems = match config.validate() {
        Ok(()) => Vec::new(),
        Err(DeckhandError::Validation { problems }) => problems,
        Err(other) => return Err(other.into()),
    };

    let mut out = io::stdout().lock();

    if globals.json {
        write_event(
            &mut out,
            &serde_json::json!({
                "event": "check",
                "config": loaded.path.display().to_string(),
                "valid": problems.is_empty(),
                "application": config.application,
                "servers": config.servers.len(),
                "warnings": loaded.warnings.iter().map(|w| w.to_string()).collect::<Vec<_>>(),
                "problems": problems,
            }),
        )?;
    } else {
        writeln!(out, "Configuration: {}", loaded.path.display())?;
        writeln!(out, "  application: {}", config.application)?;
        writeln!(
            out,
            "  repository:  {}",
            config.repo_url.as_deref().unwrap_or("-")
        )?;
        writeln!(out, "  branch:      {}", config.branch)?;
        writeln!(out, "  deploy_to:   {}", config.deploy_to)?;
        writeln!(out, "  servers:     {}", config.servers.len())?;

        for warning in &loaded.warnings {
            writeln!(out, "⚠ {}", warning)?;
        }
        for problem in &problems {
            writeln!(out, "✗ {}", problem)?;
        }
        if problems.is_empty() {
            writeln!(out, "✓ Configuration OK")?;
        }
    }

    if !problems.is_empty() {
        bail!("configuration has {} problem(s)", problems.len());
    }
    Ok(())
}
