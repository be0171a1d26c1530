//! One ssh child process with guaranteed cleanup

use std::io::{self, Read};
use std::process::{Child, ExitStatus};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// A running remote session.
///
/// Dropping an unfinished session kills and reaps the child, so the session
/// is released on every path out of `execute`.
pub(super) struct Session {
    child: Child,
    started: Instant,
    finished: bool,
    stdout: Option<Receiver<String>>,
    stderr: Option<Receiver<String>>,
}

/// What the child produced
pub(super) struct Captured {
    /// `None` when the session ran past its timeout
    pub status: Option<ExitStatus>,
    pub stdout: String,
    pub stderr: String,
}

impl Captured {
    fn timed_out() -> Self {
        Self {
            status: None,
            stdout: String::new(),
            stderr: String::new(),
        }
    }
}

impl Session {
    pub(super) fn start(mut child: Child) -> Self {
        let stdout = child.stdout.take().map(spawn_reader);
        let stderr = child.stderr.take().map(spawn_reader);
        Self {
            child,
            started: Instant::now(),
            finished: false,
            stdout,
            stderr,
        }
    }

    /// Wait for exit and drained output, giving up once `timeout` elapses.
    ///
    /// Processes forked by the client may keep the pipes open after it is
    /// killed; their readers are left detached instead of awaited.
    pub(super) fn finish(mut self, timeout: Option<Duration>) -> io::Result<Captured> {
        let deadline = timeout.map(|t| self.started + t);

        let Some(status) = self.wait(deadline)? else {
            return Ok(Captured::timed_out());
        };
        let Some(stdout) = drain(self.stdout.take(), deadline) else {
            return Ok(Captured::timed_out());
        };
        let Some(stderr) = drain(self.stderr.take(), deadline) else {
            return Ok(Captured::timed_out());
        };

        Ok(Captured {
            status: Some(status),
            stdout,
            stderr,
        })
    }

    fn wait(&mut self, deadline: Option<Instant>) -> io::Result<Option<ExitStatus>> {
        let Some(deadline) = deadline else {
            let status = self.child.wait()?;
            self.finished = true;
            return Ok(Some(status));
        };

        loop {
            if let Some(status) = self.child.try_wait()? {
                self.finished = true;
                return Ok(Some(status));
            }
            if Instant::now() >= deadline {
                self.kill();
                return Ok(None);
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    fn kill(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
        self.finished = true;
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if !self.finished {
            self.kill();
        }
    }
}

fn spawn_reader<R: Read + Send + 'static>(mut pipe: R) -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        let _ = tx.send(String::from_utf8_lossy(&buf).into_owned());
    });
    rx
}

/// Collect one pipe's output; `None` if it is still open at `deadline`
fn drain(reader: Option<Receiver<String>>, deadline: Option<Instant>) -> Option<String> {
    let Some(reader) = reader else {
        return Some(String::new());
    };
    let Some(deadline) = deadline else {
        return Some(reader.recv().unwrap_or_default());
    };

    let remaining = deadline.saturating_duration_since(Instant::now());
    match reader.recv_timeout(remaining) {
        Ok(output) => Some(output),
        Err(RecvTimeoutError::Disconnected) => Some(String::new()),
        Err(RecvTimeoutError::Timeout) => None,
    }
}
