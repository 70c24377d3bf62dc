use std::{env, path::PathBuf};

const CONFIG_FILE: &str = ".pr-swipe.toml";

/// Load config file content
///
/// Searches in:
/// 1. Current working directory as .pr-swipe.toml
/// 2. Home directory as .pr-swipe.toml
/// 3. The platform config directory as config.toml
///
/// Returns the file content if found, None otherwise.
pub fn load_config_file() -> Option<String> {
    if let Ok(content) = std::fs::read_to_string(CONFIG_FILE) {
        log::debug!("Loaded config from {}", CONFIG_FILE);
        return Some(content);
    }

    if let Some(home_config) = get_home_config_path() {
        if let Ok(content) = std::fs::read_to_string(&home_config) {
            log::debug!("Loaded config from {}", home_config.display());
            return Some(content);
        }
    }

    if let Ok(app_config) = crate::paths::app_config_path() {
        if let Ok(content) = std::fs::read_to_string(&app_config) {
            log::debug!("Loaded config from {}", app_config.display());
            return Some(content);
        }
    }

    None
}

/// Returns ~/.pr-swipe.toml if HOME environment variable is set.
fn get_home_config_path() -> Option<PathBuf> {
    env::var_os("HOME").map(|home| PathBuf::from(home).join(CONFIG_FILE))
}
