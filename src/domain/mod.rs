//! Domain Layer
//!
//! Pure types and rules for hosts, roles and tasks, without I/O.
//!
//! ## Structure
//!
//! - `entities/` - Host, Task, HostOutcome, TaskSummary
//! - `value_objects/` - Role, RoleFilter, OutputFormat, LogLevel
//! - `ports/` - Interface definitions for infrastructure (RemoteExecutor, ReportSink)

pub mod entities;
pub mod ports;
pub mod value_objects;
