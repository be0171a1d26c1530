//! Remote task command handler (`uptime`, `run`)

use std::io;

use anyhow::Result;
use tracing::warn;

use deckhand::presentation::{create_executor, create_sink, effective_format};
use deckhand::{RoleFilter, Task, TaskRunner};

use super::Globals;

/// Run `task` on the hosts selected by `roles`.
///
/// Exits successfully even when some hosts failed; each failure is already
/// reported on its own output line.
pub fn cmd_task(task: Task, roles: &RoleFilter, parallel: bool, globals: &Globals<'_>) -> Result<()> {
    let loaded = super::prepare(globals)?;
    let hosts = loaded.config.hosts()?;
    let selected = roles.select(&hosts);

    if selected.is_empty() {
        warn!(roles = %roles, "no configured hosts match the requested roles");
    }

    let executor = create_executor(&loaded.config);
    let format = effective_format(&loaded.config, globals.json);
    let mut sink = create_sink(format, io::stdout().lock());

    let summary = TaskRunner::new(&executor)
        .parallel(parallel)
        .run(&task, &selected, sink.as_mut())?;

    if !summary.is_success() {
        warn!(
            task = task.name(),
            failures = summary.failures,
            hosts = summary.hosts,
            "some hosts failed"
        );
    }

    Ok(())
}
