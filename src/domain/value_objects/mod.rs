//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod log_level;
mod output_format;
mod role;
mod role_filter;

pub use log_level::LogLevel;
pub use output_format::OutputFormat;
pub use role::{join_roles, Role, RoleError, ALL_ROLES, WELL_KNOWN_ROLES};
pub use role_filter::RoleFilter;
