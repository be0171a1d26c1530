//! Output Rendering
//!
//! Report sinks for the three output formats plus the `hosts` listing.

use std::io::{self, Write};

use crossterm::style::Stylize;
use is_terminal::IsTerminal;

use crate::domain::entities::{Host, HostOutcome, Task, TaskSummary};
use crate::domain::ports::ReportSink;
use crate::domain::value_objects::OutputFormat;

/// Whether `pretty` output should be colored on stdout
pub fn color_enabled(format: OutputFormat) -> bool {
    color_enabled_with(
        format,
        io::stdout().is_terminal(),
        |key| std::env::var(key).ok(),
    )
}

fn color_enabled_with(
    format: OutputFormat,
    is_tty: bool,
    get_env: impl Fn(&str) -> Option<String>,
) -> bool {
    if format != OutputFormat::Pretty || !is_tty {
        return false;
    }
    if get_env("NO_COLOR").is_some() {
        return false;
    }
    !get_env("TERM")
        .unwrap_or_default()
        .eq_ignore_ascii_case("dumb")
}

/// Line-per-host sink, optionally colored
pub struct TextSink<W: Write> {
    out: W,
    color: bool,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    fn colored_line(outcome: &HostOutcome<'_>) -> String {
        let host = outcome.host;
        let prefix = format!(
            "Host {} ({}):",
            host.address().cyan().bold(),
            host.roles_label().dark_grey()
        );
        match &outcome.result {
            Ok(output) => format!("{}\t{}", prefix, output),
            Err(err) => format!("{}\t{}", prefix, format!("error: {}", err).red()),
        }
    }
}

impl<W: Write> ReportSink for TextSink<W> {
    fn host_finished(&mut self, outcome: &HostOutcome<'_>) -> io::Result<()> {
        let line = if self.color {
            Self::colored_line(outcome)
        } else {
            outcome.to_line()
        };
        writeln!(self.out, "{}", line)?;
        self.out.flush()
    }
}

/// Write a single NDJSON event (one JSON object per line).
pub fn write_event(out: &mut impl Write, event: &serde_json::Value) -> io::Result<()> {
    let line = serde_json::to_string(event).unwrap_or_else(|_| "{}".to_string());
    out.write_all(line.as_bytes())?;
    out.write_all(b"\n")?;
    out.flush()
}

fn roles_json(host: &Host) -> Vec<&str> {
    host.roles().iter().map(|r| r.as_str()).collect()
}

/// NDJSON sink: `start`, one `host` per host, then `complete`
pub struct JsonSink<W: Write> {
    out: W,
    task: String,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            task: String::new(),
        }
    }
}

impl<W: Write> ReportSink for JsonSink<W> {
    fn task_started(&mut self, task: &Task, host_count: usize) -> io::Result<()> {
        self.task = task.name().to_string();
        write_event(
            &mut self.out,
            &serde_json::json!({
                "event": "start",
                "task": task.name(),
                "command": task.command(),
                "hosts": host_count,
                "version": env!("CARGO_PKG_VERSION"),
            }),
        )
    }

    fn host_finished(&mut self, outcome: &HostOutcome<'_>) -> io::Result<()> {
        let host = outcome.host;
        let event = match &outcome.result {
            Ok(output) => serde_json::json!({
                "event": "host",
                "task": self.task,
                "host": host.address(),
                "roles": roles_json(host),
                "ok": true,
                "output": output,
            }),
            Err(err) => serde_json::json!({
                "event": "host",
                "task": self.task,
                "host": host.address(),
                "roles": roles_json(host),
                "ok": false,
                "kind": err.kind(),
                "error": err.to_string(),
            }),
        };
        write_event(&mut self.out, &event)
    }

    fn task_finished(&mut self, summary: &TaskSummary) -> io::Result<()> {
        write_event(
            &mut self.out,
            &serde_json::json!({
                "event": "complete",
                "task": summary.task,
                "success": summary.is_success(),
                "hosts": summary.hosts,
                "failures": summary.failures,
                "duration_ms": summary.elapsed.as_millis() as u64,
            }),
        )
    }
}

/// Aligned `address  user  roles` rows for the `hosts` command
pub fn host_rows(hosts: &[&Host]) -> Vec<String> {
    let addresses: Vec<String> = hosts
        .iter()
        .map(|h| match h.port() {
            Some(port) => format!("{}:{}", h.address(), port),
            None => h.address().to_string(),
        })
        .collect();
    let users: Vec<&str> = hosts.iter().map(|h| h.user().unwrap_or("-")).collect();

    let address_width = addresses.iter().map(String::len).max().unwrap_or(0);
    let user_width = users.iter().map(|u| u.len()).max().unwrap_or(0);

    hosts
        .iter()
        .zip(addresses.iter().zip(users.iter()))
        .map(|(host, (address, user))| {
            format!(
                "{:<aw$}  {:<uw$}  {}",
                address,
                user,
                host.roles_label(),
                aw = address_width,
                uw = user_width
            )
        })
        .collect()
}

/// JSON object describing one host for the `hosts` command
pub fn host_json(host: &Host) -> serde_json::Value {
    serde_json::json!({
        "event": "host",
        "host": host.address(),
        "user": host.user(),
        "port": host.port(),
        "roles": roles_json(host),
    })
}
