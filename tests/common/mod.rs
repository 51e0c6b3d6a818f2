//! In-process stub of the admin backend. Each test spawns its own instance
//! on a free port so token state and call counters stay isolated.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

pub const TEMP_TOKEN: &str = "temp-1";
pub const MFA_SECRET: &str = "JBSWY3DPEHPK3PXP";

pub struct BackendState {
    /// The access token the stub currently honors.
    pub access_token: Mutex<String>,
    /// The refresh token the stub currently honors.
    pub refresh_token: Mutex<String>,
    pub refresh_calls: AtomicUsize,
    pub refresh_ok: AtomicBool,
    pub mfa_setup_calls: AtomicUsize,
    pub mfa_setup_required: AtomicBool,
}

impl BackendState {
    fn new() -> Self {
        Self {
            access_token: Mutex::new("A1".to_string()),
            refresh_token: Mutex::new("R1".to_string()),
            refresh_calls: AtomicUsize::new(0),
            refresh_ok: AtomicBool::new(true),
            mfa_setup_calls: AtomicUsize::new(0),
            mfa_setup_required: AtomicBool::new(false),
        }
    }

    pub fn current_access(&self) -> String {
        self.access_token.lock().unwrap().clone()
    }

    pub fn current_refresh(&self) -> String {
        self.refresh_token.lock().unwrap().clone()
    }
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error_code": "UNAUTHORIZED", "message": message })),
    )
        .into_response()
}

async fn login(
    State(state): State<Arc<BackendState>>,
    Json(body): Json<Value>,
) -> Response {
    if body.get("password").and_then(Value::as_str) == Some("wrong") {
        return unauthorized("Invalid credentials");
    }
    let setup = state.mfa_setup_required.load(Ordering::SeqCst);
    Json(json!({
        "temp_token": TEMP_TOKEN,
        "mfa_setup_required": setup,
        "mfa_code_required": !setup,
    }))
    .into_response()
}

async fn mfa_setup(State(state): State<Arc<BackendState>>, headers: HeaderMap) -> Response {
    state.mfa_setup_calls.fetch_add(1, Ordering::SeqCst);
    if bearer(&headers).as_deref() != Some(TEMP_TOKEN) {
        return unauthorized("temp token required");
    }
    Json(json!({
        "secret": MFA_SECRET,
        "qrCodeUrl": "https://chart.example.com/qr.png",
        "otpauthUrl": "otpauth://totp/baft:ops@baft.in?secret=JBSWY3DPEHPK3PXP",
    }))
    .into_response()
}

async fn mfa_verify(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if bearer(&headers).as_deref() != Some(TEMP_TOKEN) {
        return unauthorized("temp token required");
    }
    if body.get("code").and_then(Value::as_str) != Some("123456") {
        return unauthorized("Invalid MFA code");
    }
    if state.mfa_setup_required.load(Ordering::SeqCst)
        && body.get("secret").and_then(Value::as_str) != Some(MFA_SECRET)
    {
        return unauthorized("secret required during enrollment");
    }
    Json(json!({
        "admin": { "id": "adm-1", "email": "ops@baft.in", "role": "OPS", "fullName": "Ops One" },
        "accessToken": state.current_access(),
        "refreshToken": state.current_refresh(),
    }))
    .into_response()
}

async fn refresh(State(state): State<Arc<BackendState>>, Json(body): Json<Value>) -> Response {
    // Lets concurrent 401 handlers pile up behind the first refresh
    tokio::time::sleep(Duration::from_millis(50)).await;
    let call = state.refresh_calls.fetch_add(1, Ordering::SeqCst) + 1;

    if !state.refresh_ok.load(Ordering::SeqCst) {
        return unauthorized("refresh token revoked");
    }
    if body.get("refreshToken").and_then(Value::as_str) != Some(state.current_refresh().as_str()) {
        return unauthorized("unknown refresh token");
    }

    let access = format!("A{}", call + 1);
    let refresh = format!("R{}", call + 1);
    *state.access_token.lock().unwrap() = access.clone();
    *state.refresh_token.lock().unwrap() = refresh.clone();

    Json(json!({ "accessToken": access, "refreshToken": refresh })).into_response()
}

async fn logout() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn users(State(state): State<Arc<BackendState>>, headers: HeaderMap) -> Response {
    if bearer(&headers).as_deref() != Some(state.current_access().as_str()) {
        return unauthorized("bad or missing access token");
    }
    Json(json!({
        "data": [{
            "id": "u_1",
            "email": "alice@example.com",
            "status": "ACTIVE",
            "createdAt": "2024-01-01T00:00:00Z"
        }],
        "pagination": { "page": 1, "limit": 20, "total": 1, "totalPages": 1 }
    }))
    .into_response()
}

/// Reflects the Authorization header so tests can assert exactly what was
/// sent on the wire.
async fn echo_auth(headers: HeaderMap) -> Json<Value> {
    Json(json!({
        "authorization": headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
    }))
}

async fn no_content() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn broken() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "<html>boom</html>").into_response()
}

async fn forbidden() -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({ "error_code": "MAINTENANCE_LOCKED", "message": "Maintenance config is locked" })),
    )
        .into_response()
}

pub struct StubBackend {
    pub base_url: String,
    pub state: Arc<BackendState>,
}

pub async fn spawn_backend() -> Result<StubBackend> {
    let state = Arc::new(BackendState::new());

    let app = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/mfa/setup", post(mfa_setup))
        .route("/auth/mfa/verify", post(mfa_verify))
        .route("/auth/refresh", post(refresh))
        .route("/auth/logout", post(logout))
        .route("/users", get(users))
        .route("/echo-auth", get(echo_auth).post(echo_auth))
        .route("/no-content", get(no_content))
        .route("/broken", get(broken))
        .route("/forbidden", get(forbidden))
        .with_state(state.clone());

    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind stub backend")?;
    let base_url = format!("http://127.0.0.1:{port}");

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("stub backend exited: {e}");
        }
    });

    Ok(StubBackend { base_url, state })
}
