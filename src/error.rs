//! Error types for Deckhand
//!
//! Uses `thiserror` for library errors. Per-host remote failures live in
//! [`crate::domain::ports::ExecError`] because they never abort a task.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::entities::HostError;
use crate::domain::value_objects::RoleError;

/// Result type alias for Deckhand operations
pub type DeckhandResult<T> = Result<T, DeckhandError>;

/// Main error type for Deckhand operations
#[derive(Error, Debug)]
pub enum DeckhandError {
    /// Configuration file could not be read
    #[error("failed to read configuration {}: {source}", .path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML or has mistyped values
    #[error("invalid configuration in {}: {message}", .file.display())]
    InvalidConfig { file: PathBuf, message: String },

    /// Configuration parsed but failed validation
    #[error("configuration has {} problem(s): {}", .problems.len(), .problems.join("; "))]
    Validation { problems: Vec<String> },

    /// Invalid role label
    #[error(transparent)]
    Role(#[from] RoleError),

    /// Host could not be built from a server entry
    #[error(transparent)]
    Host(#[from] HostError),
}
