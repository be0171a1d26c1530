//! SSH Remote Executor
//!
//! Implements `RemoteExecutor` by invoking the system `ssh` client, one
//! process per host and command.

mod classify;
mod session;

pub use classify::{classify, SSH_TRANSPORT_FAILURE};

use std::collections::BTreeMap;
use std::process::{Command, Stdio};
use std::time::Duration;

use tracing::{debug, trace};

use crate::config::Config;
use crate::domain::entities::Host;
use crate::domain::ports::{ExecError, RemoteExecutor};

use session::Session;

/// Settings for building ssh invocations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshOptions {
    pub program: String,
    pub connect_timeout: Duration,
    /// `None` waits forever
    pub command_timeout: Option<Duration>,
    pub batch_mode: bool,
    pub pty: bool,
    pub extra_options: Vec<String>,
    pub env: BTreeMap<String, String>,
}

impl Default for SshOptions {
    fn default() -> Self {
        Self {
            program: "ssh".to_string(),
            connect_timeout: Duration::from_secs(10),
            command_timeout: Some(Duration::from_secs(30)),
            batch_mode: true,
            pty: false,
            extra_options: Vec::new(),
            env: BTreeMap::new(),
        }
    }
}

impl SshOptions {
    pub fn from_config(config: &Config) -> Self {
        let ssh = &config.ssh;
        Self {
            program: ssh.program.clone(),
            connect_timeout: Duration::from_secs(ssh.connect_timeout_secs),
            command_timeout: (ssh.command_timeout_secs > 0)
                .then(|| Duration::from_secs(ssh.command_timeout_secs)),
            batch_mode: ssh.batch_mode,
            pty: config.pty,
            extra_options: ssh.options.clone(),
            env: config.default_env.clone(),
        }
    }
}

/// Remote executor backed by the `ssh` binary
#[derive(Debug, Clone, Default)]
pub struct SshExecutor {
    options: SshOptions,
}

impl SshExecutor {
    pub fn new(options: SshOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SshOptions {
        &self.options
    }

    /// Arguments passed to the ssh client for `command` on `host`
    pub fn build_args(&self, host: &Host, command: &str) -> Vec<String> {
        let mut args = Vec::new();

        if self.options.pty {
            args.push("-tt".to_string());
        }
        if let Some(port) = host.port() {
            args.push("-p".to_string());
            args.push(port.to_string());
        }
        if self.options.batch_mode {
            args.push("-o".to_string());
            args.push("BatchMode=yes".to_string());
        }
        args.push("-o".to_string());
        args.push(format!(
            "ConnectTimeout={}",
            self.options.connect_timeout.as_secs()
        ));
        for option in &self.options.extra_options {
            args.push("-o".to_string());
            args.push(option.clone());
        }

        args.push(host.destination());
        args.push(self.remote_command(command));
        args
    }

    /// Wrap `command` so configured environment variables are exported first.
    ///
    /// Values are double-quoted, so remote references such as `$PATH`
    /// expand on the host.
    pub fn remote_command(&self, command: &str) -> String {
        if self.options.env.is_empty() {
            return command.to_string();
        }

        let exports = self
            .options
            .env
            .iter()
            .map(|(key, value)| format!("{}={}", key, double_quote(value)))
            .collect::<Vec<_>>()
            .join(" ");
        format!("( export {} ; {} )", exports, command)
    }
}

impl RemoteExecutor for SshExecutor {
    fn execute(&self, host: &Host, command: &str) -> Result<String, ExecError> {
        let args = self.build_args(host, command);
        trace!(program = %self.options.program, ?args, "spawning ssh");

        let child = Command::new(&self.options.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ExecError::Spawn(format!("{}: {}", self.options.program, e)))?;

        let captured = Session::start(child)
            .finish(self.options.command_timeout)
            .map_err(|e| ExecError::Connection {
                host: host.address().to_string(),
                message: e.to_string(),
            })?;

        let Some(status) = captured.status else {
            let after = self.options.command_timeout.unwrap_or_default();
            debug!(host = %host, timeout = ?after, "session timed out");
            return Err(ExecError::Timeout { after });
        };

        debug!(host = %host, code = ?status.code(), "ssh exited");
        classify(
            host.address(),
            status.code(),
            &captured.stdout,
            &captured.stderr,
        )
    }
}

fn double_quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        if matches!(c, '\\' | '"' | '`') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}
