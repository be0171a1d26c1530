//! Map an ssh exit to captured output or an [`ExecError`]

use crate::domain::ports::ExecError;

/// OpenSSH exits with 255 when the transport itself failed
pub const SSH_TRANSPORT_FAILURE: i32 = 255;

const AUTH_MARKERS: &[&str] = &[
    "Permission denied",
    "Authentication failed",
    "Host key verification failed",
    "Too many authentication failures",
];

/// Classify a finished session.
///
/// `code` is `None` when the client was terminated by a signal.
pub fn classify(
    host: &str,
    code: Option<i32>,
    stdout: &str,
    stderr: &str,
) -> Result<String, ExecError> {
    match code {
        Some(0) => Ok(stdout.trim().to_string()),
        Some(SSH_TRANSPORT_FAILURE) => {
            let message = last_line(stderr)
                .unwrap_or("ssh exited with status 255")
                .to_string();
            if AUTH_MARKERS.iter().any(|m| stderr.contains(m)) {
                Err(ExecError::Auth {
                    host: host.to_string(),
                    message,
                })
            } else {
                Err(ExecError::Connection {
                    host: host.to_string(),
                    message,
                })
            }
        }
        Some(status) => Err(ExecError::RemoteCommand {
            status,
            stderr: stderr.trim().to_string(),
        }),
        None => Err(ExecError::Connection {
            host: host.to_string(),
            message: "ssh terminated by signal".to_string(),
        }),
    }
}

fn last_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty()).last()
}
