//! Configuration loading and path resolution

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DeckhandError, DeckhandResult};

use super::types::{Config, LogLevel, OutputFormat};

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "deploy.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> DeckhandResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|source| DeckhandError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    parse_with_warnings(&content, path)
}

/// Parse TOML text; `path` is only used for messages.
pub fn parse_with_warnings(
    content: &str,
    path: &Path,
) -> DeckhandResult<(Config, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| DeckhandError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Pick the configuration file to load.
///
/// Order: explicit path, `DECKHAND_CONFIG`, `./deploy.toml`,
/// `./config/deploy.toml`, `~/.config/deckhand/deploy.toml`.
/// Falls back to `./deploy.toml` so the read error names a sensible path.
pub fn resolve_config_path(explicit: Option<&Path>, cwd: &Path) -> PathBuf {
    resolve_config_path_with(explicit, cwd, |key| std::env::var(key).ok(), dirs::config_dir())
}

pub(crate) fn resolve_config_path_with(
    explicit: Option<&Path>,
    cwd: &Path,
    get_env: impl Fn(&str) -> Option<String>,
    user_config_dir: Option<PathBuf>,
) -> PathBuf {
    if let Some(path) = explicit {
        return cwd.join(path);
    }

    if let Some(path) = get_env("DECKHAND_CONFIG").filter(|p| !p.trim().is_empty()) {
        return cwd.join(path);
    }

    let mut candidates = vec![
        cwd.join(CONFIG_FILE_NAME),
        cwd.join("config").join(CONFIG_FILE_NAME),
    ];
    if let Some(dir) = user_config_dir {
        candidates.push(dir.join("deckhand").join(CONFIG_FILE_NAME));
    }

    candidates
        .into_iter()
        .find(|p| p.is_file())
        .unwrap_or_else(|| cwd.join(CONFIG_FILE_NAME))
}

/// Apply environment variable overrides (DECKHAND_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    with_env_overrides_from(config, |key| std::env::var(key).ok())
}

pub(crate) fn with_env_overrides_from(
    mut config: Config,
    get_env: impl Fn(&str) -> Option<String>,
) -> Config {
    // DECKHAND_BRANCH
    if let Some(branch) = get_env("DECKHAND_BRANCH").filter(|b| !b.trim().is_empty()) {
        config.branch = branch.trim().to_string();
    }

    // DECKHAND_FORMAT
    if let Some(format) = get_env("DECKHAND_FORMAT") {
        if let Ok(format) = format.parse::<OutputFormat>() {
            config.format = format;
        }
    }

    // DECKHAND_LOG_LEVEL
    if let Some(level) = get_env("DECKHAND_LOG_LEVEL") {
        if let Ok(level) = level.parse::<LogLevel>() {
            config.log_level = level;
        }
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "application",
        "repo_url",
        "branch",
        "deploy_to",
        "scm",
        "format",
        "log_level",
        "pty",
        "linked_files",
        "linked_dirs",
        "default_env",
        "keep_releases",
        "ssh",
        "program",
        "connect_timeout_secs",
        "command_timeout_secs",
        "batch_mode",
        "options",
        "server",
        "address",
        "user",
        "port",
        "roles",
    ];

    let mut best: Option<(&str, usize)> = None;
    for &candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("servers", "server"), 1);
        assert_eq!(levenshtein("deploy_to", "deploy_to"), 0);
        assert_eq!(levenshtein("", "pty"), 3);
    }

    #[test]
    fn test_suggest_key() {
        assert_eq!(suggest_key("servers"), Some("server".to_string()));
        assert_eq!(suggest_key("linked_dir"), Some("linked_dirs".to_string()));
        assert_eq!(suggest_key("completely_unrelated"), None);
    }

    #[test]
    fn test_warning_display() {
        let warning = ConfigWarning {
            key: "servers".to_string(),
            file: PathBuf::from("deploy.toml"),
            line: Some(9),
            suggestion: Some("server".to_string()),
        };
        assert_eq!(
            warning.to_string(),
            "unknown key 'servers' in deploy.toml:9 (did you mean 'server'?)"
        );
    }
}
