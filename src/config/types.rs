//! Configuration type definitions

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::entities::Host;
use crate::domain::value_objects::Role;
use crate::error::{DeckhandError, DeckhandResult};

use super::loader::{self, ConfigWarning};

pub use crate::domain::value_objects::{LogLevel, OutputFormat};

/// Source control system used by the application repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Scm {
    #[default]
    Git,
}

/// One `[[server]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub address: String,

    #[serde(default)]
    pub user: Option<String>,

    #[serde(default)]
    pub port: Option<u16>,

    #[serde(default)]
    pub roles: Vec<Role>,
}

/// SSH transport settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshConfig {
    /// Client binary
    #[serde(default = "default_ssh_program")]
    pub program: String,

    /// Passed as `-o ConnectTimeout=N`
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Wall-clock limit per session; 0 disables it
    #[serde(default = "default_command_timeout")]
    pub command_timeout_secs: u64,

    /// Passed as `-o BatchMode=yes` so a password prompt never blocks
    #[serde(default = "default_true")]
    pub batch_mode: bool,

    /// Extra `-o` options, e.g. `"StrictHostKeyChecking=accept-new"`
    #[serde(default)]
    pub options: Vec<String>,
}

impl Default for SshConfig {
    fn default() -> Self {
        Self {
            program: default_ssh_program(),
            connect_timeout_secs: default_connect_timeout(),
            command_timeout_secs: default_command_timeout(),
            batch_mode: true,
            options: Vec::new(),
        }
    }
}

fn default_ssh_program() -> String {
    "ssh".to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_command_timeout() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_branch() -> String {
    "master".to_string()
}

fn default_keep_releases() -> u32 {
    5
}

/// Deployment configuration (`deploy.toml`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub application: String,

    #[serde(default)]
    pub repo_url: Option<String>,

    #[serde(default = "default_branch")]
    pub branch: String,

    pub deploy_to: String,

    #[serde(default)]
    pub scm: Scm,

    #[serde(default)]
    pub format: OutputFormat,

    #[serde(default)]
    pub log_level: LogLevel,

    /// Request a pseudo-terminal for remote commands
    #[serde(default)]
    pub pty: bool,

    #[serde(default)]
    pub linked_files: Vec<String>,

    #[serde(default)]
    pub linked_dirs: Vec<String>,

    /// Exported before every remote command
    #[serde(default)]
    pub default_env: BTreeMap<String, String>,

    #[serde(default = "default_keep_releases")]
    pub keep_releases: u32,

    #[serde(default)]
    pub ssh: SshConfig,

    #[serde(default, rename = "server")]
    pub servers: Vec<ServerConfig>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> DeckhandResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys)
    pub fn load_with_warnings(path: &Path) -> DeckhandResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> DeckhandResult<Self> {
        let (config, _warnings) =
            loader::parse_with_warnings(content, &PathBuf::from("<inline>"))?;
        Ok(config)
    }

    /// Check every rule and report all problems at once
    pub fn validate(&self) -> DeckhandResult<()> {
        let problems = self.problems();
        if problems.is_empty() {
            Ok(())
        } else {
            Err(DeckhandError::Validation { problems })
        }
    }

    fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.application.trim().is_empty() {
            problems.push("application must not be empty".to_string());
        }

        let deploy_to = self.deploy_to.trim();
        if deploy_to.is_empty() {
            problems.push("deploy_to must not be empty".to_string());
        } else if !deploy_to.starts_with('/') && !deploy_to.starts_with('~') {
            problems.push(format!(
                "deploy_to '{}' must be an absolute path",
                self.deploy_to
            ));
        }

        if self.branch.trim().is_empty() {
            problems.push("branch must not be empty".to_string());
        }

        if self.keep_releases == 0 {
            problems.push("keep_releases must be at least 1".to_string());
        }

        if self.ssh.connect_timeout_secs == 0 {
            problems.push("ssh.connect_timeout_secs must be at least 1".to_string());
        }

        if self.ssh.program.trim().is_empty() {
            problems.push("ssh.program must not be empty".to_string());
        }

        for (kind, entries) in [
            ("linked_dirs", &self.linked_dirs),
            ("linked_files", &self.linked_files),
        ] {
            for entry in entries {
                if entry.starts_with('/') || entry.split('/').any(|part| part == "..") {
                    problems.push(format!(
                        "{} entry '{}' must be relative to the shared directory",
                        kind, entry
                    ));
                }
            }
        }

        for key in self.default_env.keys() {
            if !is_env_name(key) {
                problems.push(format!("default_env key '{}' is not a valid variable name", key));
            }
        }

        let mut seen: HashSet<(String, Option<u16>)> = HashSet::new();
        for server in &self.servers {
            let address = server.address.trim();
            if address.is_empty() {
                problems.push("server address must not be empty".to_string());
                continue;
            }
            if server.roles.is_empty() {
                problems.push(format!("server '{}' must have at least one role", address));
            }
            if !seen.insert((address.to_string(), server.port)) {
                problems.push(format!("server '{}' is declared more than once", address));
            }
        }

        problems
    }

    /// Build hosts from `[[server]]` entries in declaration order
    pub fn hosts(&self) -> DeckhandResult<Vec<Host>> {
        self.servers
            .iter()
            .map(|server| -> DeckhandResult<Host> {
                let host = Host::new(server.address.as_str(), server.roles.iter().cloned())?
                    .with_user(server.user.clone())
                    .with_port(server.port);
                Ok(host)
            })
            .collect()
    }
}

fn is_env_name(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
