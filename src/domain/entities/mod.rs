//! Domain Entities
//!
//! - `Host` - A configured remote machine with roles
//! - `Task` - A named remote command
//! - `HostOutcome` / `TaskSummary` - What running a task produced

mod host;
mod outcome;
mod task;

pub use host::{Host, HostError};
pub use outcome::{HostOutcome, TaskSummary};
pub use task::{Task, UPTIME_TASK};
