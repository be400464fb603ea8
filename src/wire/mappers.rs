//! Total DTO-to-domain conversions.
//!
//! Every conversion here is infallible for any record serde accepted:
//! unrecognized enum tags collapse to the `Unknown` variant, malformed
//! timestamps degrade to `None`, and absent lists become empty. A single
//! bad field never discards the enclosing record.

use chrono::{DateTime, Utc};

use super::dtos::{AlertDto, NotificationDto, TokenResponse, UserDto};
use crate::domain::{
    Alert, AlertNotification, AlertStatus, AuthTokens, EmergencyType, NotificationType,
    UserProfile, UserRole,
};

/// Parse an RFC 3339 timestamp string, degrading to `None` on failure.
pub(crate) fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Render a free-form priority value as text. Numbers are stringified,
/// empty strings and other JSON shapes count as absent.
fn priority_text(raw: Option<serde_json::Value>) -> Option<String> {
    match raw {
        Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

impl TokenResponse {
    /// Split into the issued token pair and the optional embedded profile.
    pub fn into_parts(self) -> (AuthTokens, Option<UserProfile>) {
        let tokens = AuthTokens {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            token_type: self.token_type,
        };
        (tokens, self.user.map(UserDto::into_domain))
    }
}

impl UserDto {
    /// Convert into the strict domain profile.
    pub fn into_domain(self) -> UserProfile {
        UserProfile {
            id: self.id,
            email: self.email,
            phone: self.phone,
            full_name: self.full_name,
            role: UserRole::from_tag(self.role.as_deref().unwrap_or("")),
            team_id: self.team_id,
            team_name: self.team_name,
            is_active: self.is_active.unwrap_or(true),
            is_verified: self.is_verified.unwrap_or(false),
            is_shared_account: self.is_shared_account.unwrap_or(false),
            specialization: self.specialization,
            created_at: parse_timestamp(self.created_at.as_deref()),
        }
    }
}

impl AlertDto {
    /// Convert into the strict domain alert.
    pub fn into_domain(self) -> Alert {
        Alert {
            id: self.id,
            user_id: self.user_id,
            kind: EmergencyType::from_tag(self.kind.as_deref().unwrap_or("")),
            status: AlertStatus::from_tag(self.status.as_deref().unwrap_or("")),
            priority: priority_text(self.priority),
            latitude: self.latitude,
            longitude: self.longitude,
            address: self.address,
            title: self.title,
            description: self.description,
            media_urls: self.media_urls.unwrap_or_default(),
            ai_analysis: self.ai_analysis,
            assigned_to: self.assigned_to,
            assigned_to_name: self.assigned_to_name,
            team_id: self.team_id,
            team_name: self.team_name,
            created_at: parse_timestamp(self.created_at.as_deref()),
            updated_at: parse_timestamp(self.updated_at.as_deref()),
            assigned_at: parse_timestamp(self.assigned_at.as_deref()),
            completed_at: parse_timestamp(self.completed_at.as_deref()),
        }
    }
}

impl NotificationDto {
    /// Convert into the strict domain notification.
    pub fn into_domain(self) -> AlertNotification {
        AlertNotification {
            id: self.id,
            user_id: self.user_id,
            kind: NotificationType::from_tag(self.kind.as_deref().unwrap_or("")),
            title: self.title,
            message: self.message,
            is_read: self.is_read,
            alert_id: self.alert_id,
            team_id: self.team_id,
            created_at: parse_timestamp(self.created_at.as_deref()),
            read_at: parse_timestamp(self.read_at.as_deref()),
        }
    }
}
