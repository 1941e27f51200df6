//! Transient status line messages.
//!
//! Every runtime-reachable failure ends up here as text: disabled commands,
//! collaborator errors, validation messages. Messages expire after a
//! level-dependent TTL, checked on each tick.

use std::time::{Duration, Instant};

use tally_config::constants::{DEFAULT_ERROR_STATUS_TTL_SECS, DEFAULT_STATUS_TTL_SECS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Error,
}

impl StatusLevel {
    pub fn label(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Success => "OK",
            Self::Error => "ERR",
        }
    }

    pub fn ttl(self) -> Duration {
        match self {
            Self::Info | Self::Success => Duration::from_secs(DEFAULT_STATUS_TTL_SECS),
            Self::Error => Duration::from_secs(DEFAULT_ERROR_STATUS_TTL_SECS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub message: String,
    pub level: StatusLevel,
    pub created_at: Instant,
}

impl Status {
    pub fn new(message: impl Into<String>, level: StatusLevel) -> Self {
        Self {
            message: message.into(),
            level,
            created_at: Instant::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, StatusLevel::Info)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, StatusLevel::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, StatusLevel::Error)
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= self.level.ttl()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_outlive_info() {
        let info = Status::info("Saved");
        let error = Status::error("Failed");
        let later = info.created_at + Duration::from_secs(DEFAULT_STATUS_TTL_SECS);
        assert!(info.is_expired_at(later));
        assert!(!error.is_expired_at(error.created_at + Duration::from_secs(DEFAULT_STATUS_TTL_SECS)));
        assert!(error.is_expired_at(error.created_at + Duration::from_secs(DEFAULT_ERROR_STATUS_TTL_SECS)));
    }

    #[test]
    fn fresh_status_is_live() {
        let status = Status::success("Done");
        assert!(!status.is_expired_at(status.created_at));
        assert_eq!(status.level.label(), "OK");
    }
}
