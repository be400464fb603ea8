//! SOS alert entities.

use chrono::{DateTime, Utc};
use std::fmt;

/// The emergency category of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmergencyType {
    Fire,
    Medical,
    Police,
    WaterRescue,
    MountainRescue,
    SearchRescue,
    Ecological,
    General,
    /// Fallback for tags this client does not recognize.
    Unknown,
}

impl EmergencyType {
    /// Parse a wire tag, falling back to `Unknown` for unrecognized input.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "fire" => Self::Fire,
            "medical" => Self::Medical,
            "police" => Self::Police,
            "water_rescue" => Self::WaterRescue,
            "mountain_rescue" => Self::MountainRescue,
            "search_rescue" => Self::SearchRescue,
            "ecological" => Self::Ecological,
            "general" => Self::General,
            _ => Self::Unknown,
        }
    }

    /// The wire tag for this category.
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::Fire => "fire",
            Self::Medical => "medical",
            Self::Police => "police",
            Self::WaterRescue => "water_rescue",
            Self::MountainRescue => "mountain_rescue",
            Self::SearchRescue => "search_rescue",
            Self::Ecological => "ecological",
            Self::General => "general",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for EmergencyType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}

/// The lifecycle status of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertStatus {
    New,
    Accepted,
    InProgress,
    Completed,
    Cancelled,
    /// Fallback for tags this client does not recognize.
    Unknown,
}

impl AlertStatus {
    /// Parse a wire tag, falling back to `Unknown` for unrecognized input.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "new" => Self::New,
            "accepted" => Self::Accepted,
            "in_progress" => Self::InProgress,
            "completed" => Self::Completed,
            "cancelled" => Self::Cancelled,
            _ => Self::Unknown,
        }
    }

    /// The wire tag for this status.
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Accepted => "accepted",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}

/// An immutable snapshot of an SOS alert.
///
/// Assignment fields (`assigned_to`, `assigned_to_name`, `team_id`,
/// `team_name`) are all present for an assigned alert and all absent
/// otherwise; the mapping layer does not enforce this, it reflects what the
/// backend sent.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub id: String,
    pub user_id: String,
    pub kind: EmergencyType,
    pub status: AlertStatus,
    /// Free-form priority label; the backend sends numbers or strings.
    pub priority: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub media_urls: Vec<String>,
    pub ai_analysis: Option<serde_json::Value>,
    pub assigned_to: Option<String>,
    pub assigned_to_name: Option<String>,
    pub team_id: Option<String>,
    pub team_name: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub assigned_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Alert {
    pub fn is_completed(&self) -> bool {
        self.status == AlertStatus::Completed
    }

    pub fn is_in_progress(&self) -> bool {
        self.status == AlertStatus::InProgress
    }

    pub fn is_assigned(&self) -> bool {
        self.assigned_to.is_some()
    }
}
