//! Configuration and data directory paths
//!
//! Uses XDG directories via `dirs` crate.
//!
//! Platform-specific locations:
//! - Linux: `~/.config/pr-swipe/`, `~/.cache/pr-swipe/`
//! - macOS: `~/Library/Application Support/pr-swipe/`, `~/Library/Caches/pr-swipe/`
//! - Windows: `%APPDATA%\pr-swipe\`, `%LOCALAPPDATA%\pr-swipe\`

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "pr-swipe";

/// Get the application config directory, creating it if needed
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the application cache directory, creating it if needed
pub fn cache_dir() -> Result<PathBuf> {
    let base = dirs::cache_dir().context("Could not determine cache directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get path to app config file
pub fn app_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_dir_exists() {
        let dir = cache_dir().unwrap();
        assert!(dir.exists());
        assert!(dir.ends_with(APP_NAME));
    }

    #[test]
    fn test_app_config_path() {
        let path = app_config_path().unwrap();
        assert!(path.ends_with("config.toml"));
        assert!(path.parent().unwrap().ends_with(APP_NAME));
    }
}
