//! Deckhand - deployment configuration and ad hoc remote tasks
//!
//! Deckhand reads a declarative `deploy.toml` describing a static site
//! deployment (repository, branch, deploy path, servers and their roles)
//! and runs small remote tasks, such as reporting uptime, on the
//! configured hosts over SSH.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{report_uptime, LineSink, RunOptions, TaskRunner};
pub use config::{Config, ConfigWarning};
pub use domain::entities::{Host, HostError, HostOutcome, Task, TaskSummary};
pub use domain::ports::{ExecError, RemoteExecutor, ReportSink};
pub use domain::value_objects::{OutputFormat, Role, RoleError, RoleFilter};
pub use error::{DeckhandError, DeckhandResult};
pub use infrastructure::{SshExecutor, SshOptions};
