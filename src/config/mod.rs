//! Configuration module for Deckhand
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (DECKHAND_*)
//! 3. `deploy.toml` (explicit path, `./deploy.toml`, `./config/deploy.toml`,
//!    or `~/.config/deckhand/deploy.toml`)
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{
    load_with_warnings, resolve_config_path, with_env_overrides, ConfigWarning,
    CONFIG_FILE_NAME,
};
pub use types::{Config, LogLevel, OutputFormat, Scm, ServerConfig, SshConfig};
