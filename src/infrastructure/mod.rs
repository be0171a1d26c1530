//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//!
//! ## Structure
//!
//! - `ssh/` - `RemoteExecutor` over the system ssh client

pub mod ssh;

pub use ssh::{SshExecutor, SshOptions};
