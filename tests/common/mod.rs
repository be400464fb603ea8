//! Shared test fixtures: a scripted backend and session helpers.

#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use serde_json::{Value, json};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use rescue_client::{MemoryBackend, SessionStore};

/// A scripted rescue backend. Tracks call counts and rotates token pairs
/// the way the real service does.
pub struct MockBackend {
    pub refresh_calls: AtomicUsize,
    pub me_calls: AtomicUsize,
    /// The access token the backend currently accepts.
    pub access_token: Mutex<String>,
    /// The refresh token the backend currently accepts.
    pub refresh_token: Mutex<String>,
    /// When false, every refresh attempt is rejected.
    pub refresh_enabled: AtomicBool,
    /// When true, `/auth/me` rejects even valid tokens.
    pub always_reject_me: AtomicBool,
    /// When false, the login response omits the embedded user.
    pub embed_user_on_login: AtomicBool,
    /// When true, refresh requests park indefinitely after being counted.
    pub hold_refresh: AtomicBool,
    seq: AtomicUsize,
}

impl MockBackend {
    pub fn new(access: &str, refresh: &str) -> Self {
        Self {
            refresh_calls: AtomicUsize::new(0),
            me_calls: AtomicUsize::new(0),
            access_token: Mutex::new(access.to_string()),
            refresh_token: Mutex::new(refresh.to_string()),
            refresh_enabled: AtomicBool::new(true),
            always_reject_me: AtomicBool::new(false),
            embed_user_on_login: AtomicBool::new(true),
            hold_refresh: AtomicBool::new(false),
            seq: AtomicUsize::new(0),
        }
    }

    /// Issue and start accepting a new token pair.
    pub fn rotate(&self) -> (String, String) {
        let n = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let access = format!("access-{n}");
        let refresh = format!("refresh-{n}");
        *self.access_token.lock().unwrap() = access.clone();
        *self.refresh_token.lock().unwrap() = refresh.clone();
        (access, refresh)
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        let expected = format!("Bearer {}", self.access_token.lock().unwrap());
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            == Some(expected.as_str())
    }
}

/// Serve the scripted backend on an ephemeral port, returning its base URL.
pub async fn start(backend: Arc<MockBackend>) -> String {
    let _ = env_logger::builder().is_test(true).try_init();
    let app = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/auth/me", get(me))
        .route("/sos", get(list_alerts).post(create_alert))
        .route("/sos/{id}", get(get_alert).patch(update_alert))
        .route("/notifications", get(list_notifications))
        .route("/notifications/{id}", patch(mark_notification))
        .route("/notifications/mark-all-read", post(mark_all_read))
        .route("/boom", get(boom))
        .route("/garbage", get(garbage))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// An in-memory session store pre-loaded with a token pair.
pub async fn store_with(access: &str, refresh: &str) -> SessionStore {
    let store = SessionStore::open(Arc::new(MemoryBackend::new()))
        .await
        .unwrap();
    store.save_tokens(access, refresh).await.unwrap();
    store
}

/// An empty in-memory session store.
pub async fn empty_store() -> SessionStore {
    SessionStore::open(Arc::new(MemoryBackend::new()))
        .await
        .unwrap()
}

pub fn user_json() -> Value {
    json!({
        "id": "u-1",
        "email": "user@example.com",
        "phone": "+79001234567",
        "full_name": "Test Responder",
        "role": "responder",
        "team_id": "t-1",
        "team_name": "Alpha",
        "is_active": true,
        "is_verified": true,
        "is_shared_account": false,
        "specialization": "paramedic",
        "created_at": "2024-01-15T08:00:00Z"
    })
}

pub fn alert_json(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "user_id": "u-1",
        "type": "fire",
        "status": status,
        "priority": 2,
        "latitude": 55.75,
        "longitude": 37.61,
        "title": "Smoke in the yard",
        "media_urls": ["https://cdn.example.com/1.jpg"],
        "created_at": "2024-03-01T10:15:00Z"
    })
}

pub fn notification_json(id: &str, read: bool) -> Value {
    json!({
        "id": id,
        "user_id": "u-1",
        "type": "sos_assigned",
        "title": "Assigned",
        "message": "You have been assigned to an alert",
        "is_read": read,
        "alert_id": "a-1",
        "created_at": "2024-03-01T10:20:00Z"
    })
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"detail": "Not authenticated"})),
    )
        .into_response()
}

async fn login(State(backend): State<Arc<MockBackend>>, Json(body): Json<Value>) -> Response {
    if body["password"].as_str() != Some("secret") {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Invalid credentials"})),
        )
            .into_response();
    }
    let (access, refresh) = backend.rotate();
    let mut response = json!({
        "access_token": access,
        "refresh_token": refresh,
        "token_type": "bearer",
    });
    if backend.embed_user_on_login.load(Ordering::SeqCst) {
        response["user"] = user_json();
    }
    Json(response).into_response()
}

async fn refresh(State(backend): State<Arc<MockBackend>>, Json(body): Json<Value>) -> Response {
    backend.refresh_calls.fetch_add(1, Ordering::SeqCst);
    if backend.hold_refresh.load(Ordering::SeqCst) {
        // Park until the caller gives up and drops the connection.
        std::future::pending::<()>().await;
    }
    let presented = body["refresh_token"].as_str().unwrap_or_default();
    let valid = backend.refresh_token.lock().unwrap().clone();
    if !backend.refresh_enabled.load(Ordering::SeqCst) || presented != valid {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Invalid refresh token"})),
        )
            .into_response();
    }
    let (access, refresh) = backend.rotate();
    Json(json!({
        "access_token": access,
        "refresh_token": refresh,
        "token_type": "bearer",
    }))
    .into_response()
}

async fn me(State(backend): State<Arc<MockBackend>>, headers: HeaderMap) -> Response {
    backend.me_calls.fetch_add(1, Ordering::SeqCst);
    if backend.always_reject_me.load(Ordering::SeqCst) || !backend.authorized(&headers) {
        return unauthorized();
    }
    Json(user_json()).into_response()
}

async fn list_alerts(State(backend): State<Arc<MockBackend>>, headers: HeaderMap) -> Response {
    if !backend.authorized(&headers) {
        return unauthorized();
    }
    // One clean record and one full of data an older client has never
    // seen: unknown tags, a malformed timestamp, a missing media list.
    let weird = json!({
        "id": "a-2",
        "user_id": "u-9",
        "type": "plasma_leak",
        "status": "paused",
        "priority": "whenever",
        "latitude": 1.0,
        "longitude": 2.0,
        "created_at": "garbage"
    });
    Json(json!([alert_json("a-1", "new"), weird])).into_response()
}

async fn create_alert(
    State(backend): State<Arc<MockBackend>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !backend.authorized(&headers) {
        return unauthorized();
    }
    Json(json!({
        "id": "a-new",
        "user_id": "u-1",
        "type": body["type"],
        "status": "new",
        "latitude": body["latitude"],
        "longitude": body["longitude"],
        "title": body["title"],
        "description": body["description"],
        "media_urls": body["media_urls"],
        "created_at": "2024-03-01T11:00:00Z"
    }))
    .into_response()
}

async fn get_alert(
    State(backend): State<Arc<MockBackend>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if !backend.authorized(&headers) {
        return unauthorized();
    }
    Json(alert_json(&id, "new")).into_response()
}

async fn update_alert(
    State(backend): State<Arc<MockBackend>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !backend.authorized(&headers) {
        return unauthorized();
    }
    let mut alert = alert_json(&id, body["status"].as_str().unwrap_or("new"));
    if let Some(description) = body["description"].as_str() {
        alert["description"] = json!(description);
    }
    Json(alert).into_response()
}

async fn list_notifications(
    State(backend): State<Arc<MockBackend>>,
    headers: HeaderMap,
) -> Response {
    if !backend.authorized(&headers) {
        return unauthorized();
    }
    Json(json!([notification_json("n-1", false)])).into_response()
}

async fn mark_notification(
    State(backend): State<Arc<MockBackend>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(_body): Json<Value>,
) -> Response {
    if !backend.authorized(&headers) {
        return unauthorized();
    }
    let mut notification = notification_json(&id, true);
    notification["read_at"] = json!("2024-03-01T12:00:00Z");
    Json(notification).into_response()
}

async fn mark_all_read(State(backend): State<Arc<MockBackend>>, headers: HeaderMap) -> Response {
    if !backend.authorized(&headers) {
        return unauthorized();
    }
    Json(json!({"status": "ok"})).into_response()
}

async fn boom() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"detail": "kaboom"})),
    )
        .into_response()
}

async fn garbage() -> Response {
    (StatusCode::OK, "<html>not json</html>").into_response()
}
