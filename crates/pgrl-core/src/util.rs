//! Utility functions for PGRL
//!
//! Environment file loading shared by the binaries.

use std::path::{Path, PathBuf};

/// Candidate locations of the PGRL env file, in search order:
/// 1. `./pgrl.env`
/// 2. User's config directory/pgrl/pgrl.env
/// 3. ~/.config/pgrl/pgrl.env
pub fn env_file_candidates() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("pgrl.env")];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("pgrl").join("pgrl.env"));
    }
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".config").join("pgrl").join("pgrl.env"));
    }
    paths
}

/// Load environment variables from the first PGRL env file found.
///
/// Returns the path that was loaded, if any. Runs before logging is set up,
/// so read failures are returned for the caller to report.
pub fn load_env_file() -> std::io::Result<Option<PathBuf>> {
    match env_file_candidates().into_iter().find(|p| p.exists()) {
        Some(path) => {
            load_env_file_from(&path)?;
            Ok(Some(path))
        }
        None => Ok(None),
    }
}

/// Load a specific env file
pub fn load_env_file_from(path: &Path) -> std::io::Result<()> {
    let contents = std::fs::read_to_string(path)?;
    parse_env_file(&contents);
    Ok(())
}

/// Parse env file contents and set environment variables (only if not already set).
/// Supports formats:
/// - `KEY=value`
/// - `export KEY=value`
/// - `KEY="quoted value"`
/// - `KEY='single quoted'`
/// - Comments starting with #
pub fn parse_env_file(contents: &str) {
    for (key, value) in parse_env_pairs(contents) {
        if std::env::var(key).is_err() {
            std::env::set_var(key, value);
        }
    }
}

fn parse_env_pairs(contents: &str) -> impl Iterator<Item = (&str, &str)> {
    contents.lines().filter_map(|line| {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);
        let (key, value) = line.split_once('=')?;
        Some((key.trim(), value.trim().trim_matches('"').trim_matches('\'')))
    })
}
