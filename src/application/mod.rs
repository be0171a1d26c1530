//! Application Layer
//!
//! Use cases that orchestrate domain types through ports.
//!
//! - `TaskRunner` - Visit hosts, run a task's command, report outcomes in order
//! - `report_uptime` - The uptime report built on `TaskRunner`

pub mod runner;
pub mod uptime;

pub use runner::{RunOptions, TaskRunner, DEFAULT_MAX_PARALLEL};
pub use uptime::{report_uptime, LineSink};
