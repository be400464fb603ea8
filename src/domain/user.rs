//! User identity and session credential types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A user's role within the rescue service.
///
/// Roles arrive from the backend as string tags. Tags this client does not
/// recognize map to [`UserRole::Unknown`] rather than failing the parse, so
/// a newer backend never breaks an older client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    /// An ordinary user who can raise alerts.
    User,
    /// A field responder who handles alerts.
    Responder,
    /// A responder leading a team.
    TeamLeader,
    /// A service administrator.
    Admin,
    /// Fallback for tags this client does not recognize.
    Unknown,
}

impl UserRole {
    /// Parse a wire tag, falling back to `Unknown` for unrecognized input.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "user" => Self::User,
            "responder" => Self::Responder,
            "team_leader" => Self::TeamLeader,
            "admin" => Self::Admin,
            _ => Self::Unknown,
        }
    }

    /// The wire tag for this role.
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Responder => "responder",
            Self::TeamLeader => "team_leader",
            Self::Admin => "admin",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}

/// An immutable snapshot of a user's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub phone: Option<String>,
    pub full_name: Option<String>,
    pub role: UserRole,
    pub team_id: Option<String>,
    pub team_name: Option<String>,
    pub is_active: bool,
    pub is_verified: bool,
    pub is_shared_account: bool,
    pub specialization: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// A token pair issued by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthTokens {
    /// Short-lived bearer credential attached to authenticated requests.
    pub access_token: String,
    /// Longer-lived credential exchanged for a new pair on expiry.
    pub refresh_token: String,
    pub token_type: String,
}
