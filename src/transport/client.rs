//! Token-bearing HTTP dispatch with single-flight refresh.

use log::{debug, warn};
use reqwest::{Method, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use super::errors::{TransportError, TransportResult};
use crate::session::SessionStore;
use crate::wire::{RefreshRequest, TokenResponse};

/// Default timeout applied to every request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// An outbound API request.
///
/// Carries everything the transport needs: method, path, query parameters,
/// an optional JSON body, and whether a bearer token must be attached.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<serde_json::Value>,
    requires_auth: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            requires_auth: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Encode`] if `body` cannot be serialized.
    pub fn json<T: Serialize>(mut self, body: &T) -> TransportResult<Self> {
        self.body = Some(serde_json::to_value(body).map_err(TransportError::Encode)?);
        Ok(self)
    }

    /// Mark the request as requiring a bearer token.
    pub fn authenticated(mut self) -> Self {
        self.requires_auth = true;
        self
    }
}

/// A response with its status and raw body text.
#[derive(Debug)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::MalformedResponse`] if the body is not
    /// valid JSON for `T`. Session state is untouched by this failure.
    pub fn json<T: DeserializeOwned>(&self) -> TransportResult<T> {
        serde_json::from_str(&self.body)
            .map_err(|e| TransportError::MalformedResponse(e.to_string()))
    }
}

/// Executes HTTP requests against the backend with automatic bearer-token
/// attachment and one-shot refresh-and-retry on a 401.
///
/// Refresh is single-flight: concurrent calls that hit a 401 at the same
/// time share one refresh; whoever waited out another caller's refresh
/// reuses the replacement token instead of spending the refresh token again.
#[derive(Clone)]
pub struct AuthenticatedTransport {
    base_url: String,
    http: reqwest::Client,
    session: SessionStore,
    refresh_lock: Arc<Mutex<()>>,
}

impl AuthenticatedTransport {
    /// Create a transport with the default request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, session: SessionStore) -> TransportResult<Self> {
        Self::with_timeout(base_url, session, REQUEST_TIMEOUT)
    }

    /// Create a transport with an explicit request timeout.
    pub fn with_timeout(
        base_url: impl Into<String>,
        session: SessionStore,
        timeout: Duration,
    ) -> TransportResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            base_url,
            http,
            session,
            refresh_lock: Arc::new(Mutex::new(())),
        })
    }

    /// The session store this transport reads tokens from and writes
    /// refreshed tokens into.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Execute `request`.
    ///
    /// Authenticated requests carry the current access token. On a 401 the
    /// transport refreshes the token pair and replays the request exactly
    /// once with the new token; the replayed outcome is returned as-is. A
    /// 401 against a token this call just minted is surfaced directly, so
    /// one logical request never spends two refresh tokens.
    ///
    /// # Errors
    ///
    /// * [`TransportError::Unauthenticated`] - no tokens, or refresh failed
    ///   (the session is cleared before this is returned)
    /// * [`TransportError::Network`] - connectivity failure, no retry
    /// * [`TransportError::Api`] - any other non-success status, no retry
    pub async fn send(&self, request: ApiRequest) -> TransportResult<ApiResponse> {
        if !request.requires_auth {
            let response = self.dispatch(&request, None).await?;
            return check_status(response);
        }

        let (token, minted) = match self.session.current_access_token() {
            Some(token) => (token, false),
            // No access token on hand; try to mint one from the refresh
            // token before giving up.
            None => (self.obtain_fresh_token(None).await?, true),
        };

        let response = self.dispatch(&request, Some(&token)).await?;
        // A token minted for this very call gets no second refresh.
        if response.status != StatusCode::UNAUTHORIZED || minted {
            return check_status(response);
        }

        // 401: refresh and replay at most once. A 401 on the replay is
        // surfaced like any other API error rather than looping.
        let fresh = self.obtain_fresh_token(Some(&token)).await?;
        debug!("retrying {} {} with refreshed token", request.method, request.path);
        let retried = self.dispatch(&request, Some(&fresh)).await?;
        check_status(retried)
    }

    /// Execute `request` and decode the JSON body of a success response.
    pub async fn send_json<T: DeserializeOwned>(&self, request: ApiRequest) -> TransportResult<T> {
        self.send(request).await?.json()
    }

    async fn dispatch(
        &self,
        request: &ApiRequest,
        token: Option<&str>,
    ) -> TransportResult<ApiResponse> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self.http.request(request.method.clone(), url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok(ApiResponse { status, body })
    }

    /// Obtain a usable access token after a 401 (or when none is stored),
    /// issuing at most one refresh call across concurrent failures.
    ///
    /// `stale` is the token the failed request carried. A caller that
    /// waited out another caller's refresh finds the stored token already
    /// rotated and reuses it instead of refreshing again.
    async fn obtain_fresh_token(&self, stale: Option<&str>) -> TransportResult<String> {
        let _guard = self.refresh_lock.lock().await;

        if let Some(current) = self.session.current_access_token() {
            if stale != Some(current.as_str()) {
                debug!("access token already rotated by a concurrent call");
                return Ok(current);
            }
        }

        let Some(refresh_token) = self.session.current_refresh_token() else {
            warn!("authorization failed with no refresh token on hand; clearing session");
            self.session.clear().await?;
            return Err(TransportError::Unauthenticated);
        };

        match self.request_refresh(&refresh_token).await {
            Ok(response) => {
                let (tokens, _) = response.into_parts();
                self.session
                    .save_tokens(&tokens.access_token, &tokens.refresh_token)
                    .await?;
                debug!("token refresh succeeded");
                Ok(tokens.access_token)
            }
            Err(error) => {
                warn!("token refresh failed: {error}; clearing session");
                self.session.clear().await?;
                Err(TransportError::Unauthenticated)
            }
        }
    }

    async fn request_refresh(&self, refresh_token: &str) -> TransportResult<TokenResponse> {
        let request = ApiRequest::post("/auth/refresh").json(&RefreshRequest {
            refresh_token: refresh_token.to_string(),
        })?;
        let response = self.dispatch(&request, None).await?;
        check_status(response)?.json()
    }
}

fn check_status(response: ApiResponse) -> TransportResult<ApiResponse> {
    if response.status.is_success() {
        Ok(response)
    } else {
        Err(TransportError::Api {
            status: response.status.as_u16(),
            message: error_detail(&response.body),
        })
    }
}

/// Pull the `detail` field out of a structured error body, falling back to
/// the raw text.
fn error_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("detail")
                .and_then(|detail| detail.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}
