//! Environment variable overrides.
//!
//! Invariants:
//! - Empty or whitespace-only variables are treated as unset.
//! - Invalid values return `ConfigError::InvalidValue` naming the variable.

use super::error::ConfigError;
use crate::types::{MatchModeSetting, Settings};

pub(crate) const CONFIG_PATH_VAR: &str = "TALLY_CONFIG_PATH";
pub(crate) const TICK_MS_VAR: &str = "TALLY_TICK_MS";
pub(crate) const MATCH_MODE_VAR: &str = "TALLY_MATCH_MODE";
pub(crate) const DOTENV_DISABLED_VAR: &str = "TALLY_DOTENV_DISABLED";

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Apply environment overrides on top of file settings.
pub(crate) fn apply_env(settings: &mut Settings) -> Result<(), ConfigError> {
    if let Some(tick) = env_var_or_none(TICK_MS_VAR) {
        settings.tick_ms = tick.parse().map_err(|_| ConfigError::InvalidValue {
            var: TICK_MS_VAR.to_string(),
            message: "must be a positive integer (milliseconds)".to_string(),
        })?;
    }
    if let Some(mode) = env_var_or_none(MATCH_MODE_VAR) {
        settings.picker_match_mode = mode
            .parse::<MatchModeSetting>()
            .map_err(|message| ConfigError::InvalidValue {
                var: MATCH_MODE_VAR.to_string(),
                message,
            })?;
    }
    Ok(())
}
