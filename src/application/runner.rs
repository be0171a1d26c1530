//! Task runner - visits selected hosts and reports each outcome
//!
//! Hosts are visited sequentially by default. In parallel mode a small pool
//! of worker threads executes sessions concurrently while the calling thread
//! buffers finished outcomes and hands them to the sink strictly in input
//! order, so output from different hosts never interleaves.

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::domain::entities::{Host, HostOutcome, Task, TaskSummary};
use crate::domain::ports::{ExecError, RemoteExecutor, ReportSink};

/// Upper bound on concurrent sessions in parallel mode
pub const DEFAULT_MAX_PARALLEL: usize = 8;

/// How hosts are scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    pub parallel: bool,
    pub max_parallel: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            parallel: false,
            max_parallel: DEFAULT_MAX_PARALLEL,
        }
    }
}

/// Runs a [`Task`] against hosts through a [`RemoteExecutor`]
pub struct TaskRunner<'e> {
    executor: &'e dyn RemoteExecutor,
    options: RunOptions,
}

impl<'e> TaskRunner<'e> {
    pub fn new(executor: &'e dyn RemoteExecutor) -> Self {
        Self {
            executor,
            options: RunOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.options.parallel = parallel;
        self
    }

    /// Visit every host exactly once and report outcomes in input order.
    ///
    /// A failing host never stops the run; only sink I/O errors do.
    pub fn run(
        &self,
        task: &Task,
        hosts: &[&Host],
        sink: &mut dyn ReportSink,
    ) -> io::Result<TaskSummary> {
        let started = Instant::now();
        let mut summary = TaskSummary::new(task.name());

        info!(
            task = task.name(),
            hosts = hosts.len(),
            parallel = self.options.parallel,
            "running task"
        );
        sink.task_started(task, hosts.len())?;

        if self.options.parallel && hosts.len() > 1 {
            self.run_parallel(task, hosts, sink, &mut summary)?;
        } else {
            self.run_sequential(task, hosts, sink, &mut summary)?;
        }

        summary.elapsed = started.elapsed();
        sink.task_finished(&summary)?;
        info!(
            task = task.name(),
            hosts = summary.hosts,
            failures = summary.failures,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "task finished"
        );

        Ok(summary)
    }

    fn visit(&self, task: &Task, host: &Host) -> Result<String, ExecError> {
        debug!(host = %host, command = task.command(), "opening session");
        let result = self.executor.execute(host, task.command());
        match &result {
            Ok(_) => debug!(host = %host, "session closed"),
            Err(err) => warn!(host = %host, error = %err, "host failed"),
        }
        result
    }

    fn run_sequential(
        &self,
        task: &Task,
        hosts: &[&Host],
        sink: &mut dyn ReportSink,
        summary: &mut TaskSummary,
    ) -> io::Result<()> {
        for host in hosts {
            let outcome = HostOutcome::new(host, self.visit(task, host));
            summary.record(&outcome);
            sink.host_finished(&outcome)?;
        }
        Ok(())
    }

    fn run_parallel(
        &self,
        task: &Task,
        hosts: &[&Host],
        sink: &mut dyn ReportSink,
        summary: &mut TaskSummary,
    ) -> io::Result<()> {
        let workers = self.options.max_parallel.clamp(1, hosts.len());
        let next = AtomicUsize::new(0);
        let (tx, rx) = mpsc::channel::<(usize, Result<String, ExecError>)>();

        std::thread::scope(|scope| {
            for _ in 0..workers {
                let tx = tx.clone();
                let next = &next;
                scope.spawn(move || loop {
                    let idx = next.fetch_add(1, Ordering::Relaxed);
                    let Some(host) = hosts.get(idx) else {
                        break;
                    };
                    let result = self.visit(task, host);
                    // Receiver is gone only if the sink failed; stop early.
                    if tx.send((idx, result)).is_err() {
                        break;
                    }
                });
            }
            drop(tx);

            let mut pending: Vec<Option<Result<String, ExecError>>> =
                (0..hosts.len()).map(|_| None).collect();
            let mut flushed = 0;

            for (idx, result) in rx {
                pending[idx] = Some(result);
                while flushed < hosts.len() {
                    let Some(result) = pending[flushed].take() else {
                        break;
                    };
                    let outcome = HostOutcome::new(hosts[flushed], result);
                    summary.record(&outcome);
                    sink.host_finished(&outcome)?;
                    flushed += 1;
                }
            }

            Ok(())
        })
    }
}
