//! RemoteExecutor port - run a command on a host and capture its output
//!
//! Implementations:
//! - `SshExecutor` - shells out to the system `ssh` client
//! - test doubles returning scripted output

use std::time::Duration;

use thiserror::Error;

use crate::domain::entities::Host;

/// Why a remote command produced no usable output
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecError {
    /// Host could not be reached
    #[error("connection to {host} failed: {message}")]
    Connection { host: String, message: String },

    /// Credentials were rejected
    #[error("authentication to {host} failed: {message}")]
    Auth { host: String, message: String },

    /// Command ran but exited non-zero
    #[error("remote command exited with status {status}{}", stderr_suffix(.stderr))]
    RemoteCommand { status: i32, stderr: String },

    /// Session exceeded the configured command timeout
    #[error("timed out after {:?}", .after)]
    Timeout { after: Duration },

    /// The local transport could not be started
    #[error("failed to start remote session: {0}")]
    Spawn(String),
}

impl ExecError {
    /// Stable machine-readable name for JSON output
    pub fn kind(&self) -> &'static str {
        match self {
            ExecError::Connection { .. } => "connection",
            ExecError::Auth { .. } => "auth",
            ExecError::RemoteCommand { .. } => "remote_command",
            ExecError::Timeout { .. } => "timeout",
            ExecError::Spawn(_) => "spawn",
        }
    }
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr)
    }
}

/// Capability to run one command on one host
///
/// Each call opens and releases its own session. Implementations must be
/// shareable across threads so hosts can be visited in parallel.
pub trait RemoteExecutor: Send + Sync {
    /// Run `command` on `host`, returning its captured standard output
    fn execute(&self, host: &Host, command: &str) -> Result<String, ExecError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_command_error_includes_stderr() {
        let err = ExecError::RemoteCommand {
            status: 127,
            stderr: "sh: uptime: not found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "remote command exited with status 127: sh: uptime: not found"
        );
    }

    #[test]
    fn remote_command_error_without_stderr() {
        let err = ExecError::RemoteCommand {
            status: 1,
            stderr: String::new(),
        };
        assert_eq!(err.to_string(), "remote command exited with status 1");
    }

    #[test]
    fn timeout_error_display() {
        let err = ExecError::Timeout {
            after: Duration::from_secs(30),
        };
        assert_eq!(err.to_string(), "timed out after 30s");
    }

    #[test]
    fn timeout_error_display_keeps_sub_second_precision() {
        let err = ExecError::Timeout {
            after: Duration::from_millis(300),
        };
        assert_eq!(err.to_string(), "timed out after 300ms");
    }
}
