//! Uptime reporter
//!
//! Runs `uptime` on every host and writes one line per host:
//!
//! ```text
//! Host comics.tamouse.org (web, app, db, workers):	10:03:21 up 4 days
//! ```

use std::io::{self, Write};

use crate::domain::entities::{Host, HostOutcome, Task, TaskSummary};
use crate::domain::ports::{RemoteExecutor, ReportSink};

use super::runner::TaskRunner;

/// Writes each outcome as one plain line and flushes immediately
pub struct LineSink<W: Write> {
    out: W,
}

impl<W: Write> LineSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for LineSink<W> {
    fn host_finished(&mut self, outcome: &HostOutcome<'_>) -> io::Result<()> {
        writeln!(self.out, "{}", outcome.to_line())?;
        self.out.flush()
    }
}

/// Report the uptime of each host, in order, to `out`.
///
/// Per-host failures become error lines; the traversal always completes.
pub fn report_uptime<'h, W: Write>(
    hosts: impl IntoIterator<Item = &'h Host>,
    executor: &dyn RemoteExecutor,
    out: W,
) -> io::Result<TaskSummary> {
    let hosts: Vec<&Host> = hosts.into_iter().collect();
    let mut sink = LineSink::new(out);
    TaskRunner::new(executor).run(&Task::uptime(), &hosts, &mut sink)
}
