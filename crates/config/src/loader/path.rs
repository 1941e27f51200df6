//! Settings file location.

use std::path::PathBuf;

use super::error::ConfigError;

/// Returns the default settings path.
///
/// - Linux/macOS: `~/.config/tally/config.json`
/// - Windows: `%AppData%\tally\config.json`
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let dirs = directories::ProjectDirs::from("", "", "tally").ok_or_else(|| {
        ConfigError::ConfigDirUnavailable("no home directory for the current user".to_string())
    })?;
    Ok(dirs.config_dir().join("config.json"))
}
