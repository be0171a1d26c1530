//! Hosts command handler
//!
//! Lists configured hosts without connecting to them.

use std::io::{self, Write};

use anyhow::Result;

use deckhand::presentation::output::{host_json, host_rows, write_event};
use deckhand::RoleFilter;

use super::Globals;

pub fn cmd_hosts(roles: &RoleFilter, globals: &Globals<'_>) -> Result<()> {
    let loaded = super::prepare(globals)?;
    let hosts = loaded.config.hosts()?;
    let selected = roles.select(&hosts);

    let mut out = io::stdout().lock();
    if globals.json {
        for host in &selected {
            write_event(&mut out, &host_json(host))?;
        }
        return Ok(());
    }

    for row in host_rows(&selected) {
        writeln!(out, "{}", row)?;
    }
    Ok(())
}
