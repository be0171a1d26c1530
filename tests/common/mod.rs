//! Common test utilities for Deckhand CLI tests.
//!
//! Provides `TestEnv`: an isolated project directory holding a `deploy.toml`
//! and a fake `ssh` client, plus helpers to run the `deckhand` binary.
//!
//! The fake client reads its behavior from files named after the ssh
//! destination (`<dest>.out`, `<dest>.err`, `<dest>.code`, `<dest>.sleep`)
//! and appends `<dest>|<remote command>` to `ssh.log` for every call.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Environment variables that would leak the developer's setup into tests
const SCRUBBED_ENV: &[&str] = &[
    "DECKHAND_CONFIG",
    "DECKHAND_BRANCH",
    "DECKHAND_FORMAT",
    "DECKHAND_LOG_LEVEL",
    "DECKHAND_LOG",
    "NO_COLOR",
];

/// Result of running a Deckhand CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn lines(&self) -> Vec<&str> {
        self.stdout.lines().collect()
    }

    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated project directory with a fake ssh client
pub struct TestEnv {
    pub root: TempDir,
    hosts_dir: PathBuf,
    ssh_path: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let hosts_dir = root.path().join("hosts");
        fs::create_dir_all(&hosts_dir).unwrap();
        let ssh_path = root.path().join("fake-ssh");
        let env = Self {
            root,
            hosts_dir,
            ssh_path,
        };
        env.install_fake_ssh();
        env
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    pub fn ssh_program(&self) -> String {
        self.ssh_path.display().to_string()
    }

    /// Write `deploy.toml`, appending an `[ssh]` table pointing at the fake client
    pub fn write_config(&self, body: &str) {
        self.write_config_with_ssh(body, "");
    }

    /// Like `write_config`, with extra lines inside the `[ssh]` table
    pub fn write_config_with_ssh(&self, body: &str, ssh_extra: &str) {
        let content = format!(
            "{}\n[ssh]\nprogram = \"{}\"\n{}\n",
            body,
            self.ssh_program(),
            ssh_extra
        );
        fs::write(self.path("deploy.toml"), content).unwrap();
    }

    /// Stdout the fake client prints for `destination`
    pub fn host_output(&self, destination: &str, stdout: &str) {
        fs::write(self.hosts_dir.join(format!("{destination}.out")), stdout).unwrap();
    }

    /// Make the fake client fail for `destination`
    pub fn host_failure(&self, destination: &str, code: i32, stderr: &str) {
        fs::write(self.hosts_dir.join(format!("{destination}.code")), code.to_string()).unwrap();
        fs::write(self.hosts_dir.join(format!("{destination}.err")), stderr).unwrap();
    }

    /// Make the fake client hang for `seconds` before producing anything
    pub fn host_sleep(&self, destination: &str, seconds: f64) {
        fs::write(
            self.hosts_dir.join(format!("{destination}.sleep")),
            seconds.to_string(),
        )
        .unwrap();
    }

    /// `<destination>|<remote command>` for every ssh call so far
    pub fn ssh_calls(&self) -> Vec<String> {
        fs::read_to_string(self.path("ssh.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Full argv of every ssh call so far
    pub fn ssh_argv(&self) -> Vec<String> {
        fs::read_to_string(self.path("ssh.argv"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = deckhand();
        cmd.current_dir(self.root.path())
            .args(args)
            .env("HOME", self.root.path())
            .env("XDG_CONFIG_HOME", self.path(".config"));
        for (key, value) in env_vars {
            cmd.env(key, value);
        }
        to_result(cmd.output().expect("failed to execute deckhand"))
    }

    fn install_fake_ssh(&self) {
        let script = format!(
            r#"#!/bin/sh
eval "dest=\${{$(($# - 1))}}"
eval "cmd=\${{$#}}"
echo "$*" >> "{argv}"
echo "$dest|$cmd" >> "{log}"
base="{hosts}/$dest"
if [ -f "$base.sleep" ]; then
  sleep "$(cat "$base.sleep")"
fi
if [ -f "$base.err" ]; then
  cat "$base.err" >&2
fi
if [ -f "$base.out" ]; then
  cat "$base.out"
fi
if [ -f "$base.code" ]; then
  exit "$(cat "$base.code")"
fi
exit 0
"#,
            argv = self.path("ssh.argv").display(),
            log = self.path("ssh.log").display(),
            hosts = self.hosts_dir.display(),
        );
        fs::write(&self.ssh_path, script).unwrap();
        make_executable(&self.ssh_path);
    }
}

/// The `deckhand` binary with color and config overrides scrubbed
pub fn deckhand() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_deckhand"));
    for key in SCRUBBED_ENV {
        cmd.env_remove(key);
    }
    cmd.env("TERM", "dumb");
    cmd
}

fn to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) {}

/// The comics site deployment: one host carrying every role
pub const COMICS_CONFIG: &str = r#"
application = "comics"
repo_url = "git@github.com:tamouse/comics-jekyll.git"
branch = "master"
deploy_to = "/home/tamara/Sites/tamouse.org/comics"
scm = "git"
format = "plain"
linked_dirs = ["vendor/bundle", "log"]

[[server]]
address = "comics.tamouse.org"
user = "tamara"
roles = ["web", "app", "db", "workers"]
"#;

pub const COMICS_UPTIME: &str = "10:03:21 up 4 days";
