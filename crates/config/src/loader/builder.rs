//! Builder-style settings loader.

use std::path::{Path, PathBuf};

use super::env::{CONFIG_PATH_VAR, DOTENV_DISABLED_VAR, apply_env, env_var_or_none};
use super::error::ConfigError;
use super::path::default_config_path;
use crate::types::Settings;

/// Loads [`Settings`] from the settings file and the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit settings path (from `--config-path`). Blank paths are ignored.
    pub fn with_config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path.filter(|p| !p.as_os_str().to_string_lossy().trim().is_empty());
        self
    }

    fn dotenv_disabled() -> bool {
        env_var_or_none(DOTENV_DISABLED_VAR)
            .is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
    }

    /// Load variables from a `.env` file in the working directory, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(dotenvy::Error::Io(io_err)) if io_err.kind() == std::io::ErrorKind::NotFound => {
                Ok(self)
            }
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    /// The path that `load` will read.
    pub fn resolve_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.config_path {
            return Ok(path.clone());
        }
        if let Some(path) = env_var_or_none(CONFIG_PATH_VAR) {
            return Ok(PathBuf::from(path));
        }
        default_config_path()
    }

    /// Load settings: defaults, then the file (if it exists), then the environment.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let path = self.resolve_path()?;
        let mut settings = read_settings_file(&path)?;
        apply_env(&mut settings)?;
        let settings = settings.sanitize();
        tracing::debug!(
            path = %path.display(),
            overrides = settings.keybind_overrides.overrides.len(),
            "Loaded settings"
        );
        Ok(settings)
    }
}

fn read_settings_file(path: &Path) -> Result<Settings, ConfigError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(Settings::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
