//! Startup configuration
//!
//! The daemon address comes from `MPD_HOST`/`MPD_PORT`, matching what other
//! clients of the protocol expect. An optional rc file holds one
//! line-command per line (the same language as `:` entry) and is executed
//! before the input loop starts.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

use crate::controller::CommandEntry;

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 6600;

pub struct Settings {
    pub host: String,
    pub port: u16,
}

impl Settings {
    pub fn from_env() -> Self {
        let host = std::env::var("MPD_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = std::env::var("MPD_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        Self { host, port }
    }
}

/// `~/.config/vimpd/vimpdrc` on Linux, the platform equivalent elsewhere.
pub fn rc_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "vimpd").map(|dirs| dirs.config_dir().join("vimpdrc"))
}

/// Executes each command line of the rc file through the command handler.
///
/// Returns false when a command asked the program to stop, in which case
/// the input loop should not start. A missing file is not an error; blank
/// lines and `#` comments are skipped.
pub fn run_startup_commands(path: &Path, commands: &CommandEntry) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }

    let contents =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        tracing::debug!(command = line, "startup command");
        if !commands.execute(line) {
            return Ok(false);
        }
    }
    Ok(true)
}
