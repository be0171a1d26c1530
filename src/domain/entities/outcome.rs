//! Per-host outcome and whole-task summary

use std::time::Duration;

use crate::domain::ports::ExecError;

use super::Host;

/// Result of running a task's command on one host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostOutcome<'a> {
    pub host: &'a Host,
    pub result: Result<String, ExecError>,
}

impl<'a> HostOutcome<'a> {
    pub fn new(host: &'a Host, result: Result<String, ExecError>) -> Self {
        Self { host, result }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Render as `Host <address> (<roles>):\t<output>` or
    /// `Host <address> (<roles>):\terror: <message>`
    pub fn to_line(&self) -> String {
        match &self.result {
            Ok(output) => format!("{}\t{}", self.host.report_prefix(), output),
            Err(err) => format!("{}\terror: {}", self.host.report_prefix(), err),
        }
    }
}

/// Counters for one task run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSummary {
    pub task: String,
    pub hosts: usize,
    pub failures: usize,
    pub elapsed: Duration,
}

impl TaskSummary {
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            hosts: 0,
            failures: 0,
            elapsed: Duration::ZERO,
        }
    }

    pub fn record(&mut self, outcome: &HostOutcome<'_>) {
        self.hosts += 1;
        if !outcome.is_success() {
            self.failures += 1;
        }
    }

    pub fn succeeded(&self) -> usize {
        self.hosts - self.failures
    }

    pub fn is_success(&self) -> bool {
        self.failures == 0
    }
}
