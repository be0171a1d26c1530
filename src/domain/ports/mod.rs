//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure and presentation layers provide concrete implementations.

pub mod remote_executor;
pub mod report_sink;

pub use remote_executor::{ExecError, RemoteExecutor};
pub use report_sink::ReportSink;
