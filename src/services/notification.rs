use serde::Serialize;
use std::time::Duration;

use crate::config::app_config::NotificationConfig;
use crate::services::error_handling::{DeskError, UserErrorFormatter};

pub const DEFAULT_ACTION: &str = "Close";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Warning,
    Error,
}

/// A dismissable message for the application shell to display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub action: String,
    pub duration: Duration,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            action: DEFAULT_ACTION.to_string(),
            duration: NotificationConfig::default().duration(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, message)
    }

    /// An error notification worded for the user.
    pub fn from_error(error: &DeskError) -> Self {
        Self::error(UserErrorFormatter::format_for_ui(error))
    }

    /// Prefer the caller's wording when the backend is unreachable or
    /// failing; other errors already carry a specific message.
    pub fn from_error_or(error: &DeskError, fallback: impl Into<String>) -> Self {
        match error {
            DeskError::Transport { .. } | DeskError::Rejected { status: 500.., .. } => {
                Self::error(fallback)
            }
            _ => Self::from_error(error),
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn configured(self, config: &NotificationConfig) -> Self {
        self.with_duration(config.duration())
    }
}
