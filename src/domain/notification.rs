//! Alert notification entities.

use chrono::{DateTime, Utc};
use std::fmt;

/// The category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    AlertCreated,
    AlertAssigned,
    AlertUpdated,
    AlertCompleted,
    TeamAssigned,
    System,
    Warning,
    Info,
    /// Fallback for tags this client does not recognize.
    Unknown,
}

impl NotificationType {
    /// Parse a wire tag, falling back to `Unknown` for unrecognized input.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "sos_created" => Self::AlertCreated,
            "sos_assigned" => Self::AlertAssigned,
            "sos_updated" => Self::AlertUpdated,
            "sos_completed" => Self::AlertCompleted,
            "team_assigned" => Self::TeamAssigned,
            "system" => Self::System,
            "warning" => Self::Warning,
            "info" => Self::Info,
            _ => Self::Unknown,
        }
    }

    /// The wire tag for this category.
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::AlertCreated => "sos_created",
            Self::AlertAssigned => "sos_assigned",
            Self::AlertUpdated => "sos_updated",
            Self::AlertCompleted => "sos_completed",
            Self::TeamAssigned => "team_assigned",
            Self::System => "system",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}

/// An immutable snapshot of a notification delivered to a user.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertNotification {
    pub id: String,
    pub user_id: String,
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub alert_id: Option<String>,
    pub team_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub read_at: Option<DateTime<Utc>>,
}
