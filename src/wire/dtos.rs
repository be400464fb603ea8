//! Wire-format records for the backend REST API.
//!
//! These shapes are deliberately loose: enum-like fields are plain strings,
//! timestamps are strings, and almost everything is optional. Anything the
//! rest of the crate consumes goes through the total conversions in
//! [`super::mappers`] first.

use serde::{Deserialize, Serialize};

/// Body for `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body for `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Body for `POST /auth/refresh`.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Response of the login and refresh endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub user: Option<UserDto>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Wire shape of a user record.
#[derive(Debug, Clone, Deserialize)]
pub struct UserDto {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub team_id: Option<String>,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub is_verified: Option<bool>,
    #[serde(default)]
    pub is_shared_account: Option<bool>,
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Wire shape of an alert record.
#[derive(Debug, Clone, Deserialize)]
pub struct AlertDto {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    /// Sent as a number by some backend versions and a string by others.
    #[serde(default)]
    pub priority: Option<serde_json::Value>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub media_urls: Option<Vec<String>>,
    #[serde(default)]
    pub ai_analysis: Option<serde_json::Value>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub assigned_to_name: Option<String>,
    #[serde(default)]
    pub team_id: Option<String>,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub assigned_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
}

/// Body for `POST /sos`.
#[derive(Debug, Clone, Serialize)]
pub struct AlertCreateRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub media_urls: Vec<String>,
}

/// Body for `PATCH /sos/{alert_id}`.
#[derive(Debug, Clone, Serialize)]
pub struct AlertUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Wire shape of a notification record.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationDto {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub alert_id: Option<String>,
    #[serde(default)]
    pub team_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub read_at: Option<String>,
}

/// Body for `PATCH /notifications/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationUpdateRequest {
    pub is_read: bool,
}
