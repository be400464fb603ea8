//! High-level operations against the rescue backend.

use crate::config::ClientConfig;
use crate::domain::{Alert, AlertNotification, AlertStatus, EmergencyType, UserProfile};
use crate::session::SessionStore;
use crate::transport::{ApiRequest, AuthenticatedTransport, TransportResult};
use crate::wire::{
    AlertCreateRequest, AlertDto, AlertUpdateRequest, LoginRequest, NotificationDto,
    NotificationUpdateRequest, RegisterRequest, TokenResponse, UserDto,
};

/// Filters for listing alerts.
#[derive(Debug, Clone, Default)]
pub struct AlertFilter {
    pub status: Option<AlertStatus>,
    pub kind: Option<EmergencyType>,
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

/// Input for creating an alert.
#[derive(Debug, Clone)]
pub struct AlertDraft {
    pub kind: EmergencyType,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub media_urls: Vec<String>,
}

impl AlertDraft {
    pub fn new(kind: EmergencyType, latitude: f64, longitude: f64) -> Self {
        Self {
            kind,
            latitude,
            longitude,
            address: None,
            title: None,
            description: None,
            media_urls: Vec::new(),
        }
    }
}

/// Client for the rescue backend.
///
/// Wraps an [`AuthenticatedTransport`] and maps wire records into domain
/// entities at the boundary. Cheap to clone; clones share the session.
#[derive(Clone)]
pub struct RescueClient {
    transport: AuthenticatedTransport,
}

impl RescueClient {
    /// Build a client from configuration and an opened session store.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig, session: SessionStore) -> TransportResult<Self> {
        let transport = AuthenticatedTransport::with_timeout(
            config.base_url.clone(),
            session,
            config.request_timeout,
        )?;
        Ok(Self { transport })
    }

    /// Build a client over an existing transport.
    pub fn from_transport(transport: AuthenticatedTransport) -> Self {
        Self { transport }
    }

    pub fn session(&self) -> &SessionStore {
        self.transport.session()
    }

    // === Authentication ===

    /// Log in with credentials.
    ///
    /// Persists the issued token pair, then the profile (taken from the
    /// token response when the backend embeds it, fetched from `/auth/me`
    /// otherwise). Both are durable before this returns.
    pub async fn login(&self, email: &str, password: &str) -> TransportResult<UserProfile> {
        let body = LoginRequest {
            email: normalize_email(email),
            password: password.to_string(),
        };
        let response: TokenResponse = self
            .transport
            .send_json(ApiRequest::post("/auth/login").json(&body)?)
            .await?;
        let (tokens, user) = response.into_parts();
        self.session()
            .save_tokens(&tokens.access_token, &tokens.refresh_token)
            .await?;

        match user {
            Some(profile) => {
                self.session().save_profile(profile.clone()).await?;
                Ok(profile)
            }
            None => self.current_user().await,
        }
    }

    /// Register a new account. No tokens are issued; call [`Self::login`]
    /// afterwards.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        full_name: Option<&str>,
        phone: Option<&str>,
    ) -> TransportResult<UserProfile> {
        let body = RegisterRequest {
            email: normalize_email(email),
            password: password.to_string(),
            full_name: normalize_optional(full_name),
            phone: normalize_phone(phone),
        };
        let dto: UserDto = self
            .transport
            .send_json(ApiRequest::post("/auth/register").json(&body)?)
            .await?;
        Ok(dto.into_domain())
    }

    /// Fetch the authenticated user's profile and cache it in the session.
    pub async fn current_user(&self) -> TransportResult<UserProfile> {
        let dto: UserDto = self
            .transport
            .send_json(ApiRequest::get("/auth/me").authenticated())
            .await?;
        let profile = dto.into_domain();
        self.session().save_profile(profile.clone()).await?;
        Ok(profile)
    }

    /// Drop all session state, locally and durably.
    pub async fn logout(&self) -> TransportResult<()> {
        self.session().clear().await?;
        Ok(())
    }

    // === Alerts ===

    /// List alerts, optionally filtered by status and type.
    pub async fn alerts(&self, filter: AlertFilter) -> TransportResult<Vec<Alert>> {
        let mut request = ApiRequest::get("/sos").authenticated();
        if let Some(status) = filter.status {
            request = request.query("status", status.as_tag());
        }
        if let Some(kind) = filter.kind {
            request = request.query("type", kind.as_tag());
        }
        if let Some(skip) = filter.skip {
            request = request.query("skip", skip.to_string());
        }
        if let Some(limit) = filter.limit {
            request = request.query("limit", limit.to_string());
        }

        let dtos: Vec<AlertDto> = self.transport.send_json(request).await?;
        Ok(dtos.into_iter().map(AlertDto::into_domain).collect())
    }

    /// Raise a new alert.
    pub async fn create_alert(&self, draft: AlertDraft) -> TransportResult<Alert> {
        let body = AlertCreateRequest {
            kind: draft.kind.as_tag().to_string(),
            latitude: draft.latitude,
            longitude: draft.longitude,
            address: draft.address,
            title: draft.title,
            description: draft.description,
            media_urls: draft.media_urls,
        };
        let dto: AlertDto = self
            .transport
            .send_json(ApiRequest::post("/sos").authenticated().json(&body)?)
            .await?;
        Ok(dto.into_domain())
    }

    /// Fetch a single alert.
    pub async fn alert(&self, alert_id: &str) -> TransportResult<Alert> {
        let dto: AlertDto = self
            .transport
            .send_json(ApiRequest::get(format!("/sos/{alert_id}")).authenticated())
            .await?;
        Ok(dto.into_domain())
    }

    /// Update an alert's status and/or description.
    pub async fn update_alert(
        &self,
        alert_id: &str,
        status: Option<AlertStatus>,
        description: Option<&str>,
    ) -> TransportResult<Alert> {
        let body = AlertUpdateRequest {
            status: status.map(|s| s.as_tag().to_string()),
            description: description.map(str::to_string),
        };
        let dto: AlertDto = self
            .transport
            .send_json(
                ApiRequest::patch(format!("/sos/{alert_id}"))
                    .authenticated()
                    .json(&body)?,
            )
            .await?;
        Ok(dto.into_domain())
    }

    /// Accept an alert for handling.
    pub async fn accept_alert(&self, alert_id: &str) -> TransportResult<Alert> {
        self.update_alert(alert_id, Some(AlertStatus::Accepted), None).await
    }

    /// Mark an accepted alert as being worked.
    pub async fn start_alert(&self, alert_id: &str) -> TransportResult<Alert> {
        self.update_alert(alert_id, Some(AlertStatus::InProgress), None).await
    }

    /// Complete an alert, optionally attaching a closing report.
    pub async fn complete_alert(
        &self,
        alert_id: &str,
        report: Option<&str>,
    ) -> TransportResult<Alert> {
        self.update_alert(alert_id, Some(AlertStatus::Completed), report).await
    }

    /// Cancel an alert.
    pub async fn cancel_alert(&self, alert_id: &str) -> TransportResult<Alert> {
        self.update_alert(alert_id, Some(AlertStatus::Cancelled), None).await
    }

    // === Notifications ===

    /// List notifications for the authenticated user.
    pub async fn notifications(&self, unread_only: bool) -> TransportResult<Vec<AlertNotification>> {
        let mut request = ApiRequest::get("/notifications").authenticated();
        if unread_only {
            request = request.query("unread_only", "true");
        }
        let dtos: Vec<NotificationDto> = self.transport.send_json(request).await?;
        Ok(dtos.into_iter().map(NotificationDto::into_domain).collect())
    }

    /// Mark one notification as read.
    pub async fn mark_notification_read(&self, id: &str) -> TransportResult<AlertNotification> {
        let body = NotificationUpdateRequest { is_read: true };
        let dto: NotificationDto = self
            .transport
            .send_json(
                ApiRequest::patch(format!("/notifications/{id}"))
                    .authenticated()
                    .json(&body)?,
            )
            .await?;
        Ok(dto.into_domain())
    }

    /// Mark every notification as read.
    pub async fn mark_all_notifications_read(&self) -> TransportResult<()> {
        self.transport
            .send(ApiRequest::post("/notifications/mark-all-read").authenticated())
            .await?;
        Ok(())
    }
}

fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn normalize_optional(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn normalize_phone(raw: Option<&str>) -> Option<String> {
    normalize_optional(raw).map(|s| {
        s.chars()
            .filter(|c| !matches!(c, ' ' | '(' | ')' | '-'))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  User@Example.COM "), "user@example.com");
    }

    #[test]
    fn test_normalize_optional_drops_blank() {
        assert_eq!(normalize_optional(Some("  ")), None);
        assert_eq!(normalize_optional(None), None);
        assert_eq!(normalize_optional(Some(" Jane Doe ")).as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_normalize_phone_strips_formatting() {
        assert_eq!(
            normalize_phone(Some(" +7 (900) 123-45-67 ")).as_deref(),
            Some("+79001234567")
        );
        assert_eq!(normalize_phone(Some("")), None);
    }
}
