//! ReportSink port - where task outcomes go as they complete

use std::io;

use crate::domain::entities::{HostOutcome, Task, TaskSummary};

/// Receives task events in configuration order
///
/// `host_finished` is called exactly once per visited host, immediately
/// after that host's outcome is ready to be shown.
pub trait ReportSink {
    fn task_started(&mut self, _task: &Task, _host_count: usize) -> io::Result<()> {
        Ok(())
    }

    fn host_finished(&mut self, outcome: &HostOutcome<'_>) -> io::Result<()>;

    fn task_finished(&mut self, _summary: &TaskSummary) -> io::Result<()> {
        Ok(())
    }
}
