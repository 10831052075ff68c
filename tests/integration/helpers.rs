//! Shared test helpers for integration tests.
//!
//! `MockApi` is an in-process axum server that answers like the real API:
//! three accounts (`user`, `moderator`, `admin`) whose bearer token is
//! `token-<role>`, canonical envelopes everywhere except registration,
//! which still answers with the legacy shape.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::net::TcpListener;

use warden_auth::{FileTokenStore, RbacService, RecordingNavigator, SessionState};
use warden_client::{AdminService, ApiClient, AuthService, UserService};
use warden_core::config::AppConfig;
use warden_core::types::User;

/// Password accepted for every mock account.
pub const PASSWORD: &str = "correct-horse";

/// Stable user IDs, one per role.
pub fn user_id(role: &str) -> &'static str {
    match role {
        "admin" => "3f0e7a52-1c4d-4f3e-9a61-0d2b7c9e8a11",
        "moderator" => "8b2d6c14-5e7f-4a90-b3c2-1e4f6a8d9c22",
        _ => "c5a1e9f3-7b2d-4c68-8e0a-2f3b5d7c9e33",
    }
}

pub fn user_json(role: &str) -> Value {
    json!({
        "id": user_id(role),
        "email": format!("{role}@example.com"),
        "username": role,
        "first_name": "Test",
        "last_name": role,
        "role": role,
        "is_active": true,
        "created_at": "2024-05-01T10:00:00Z",
        "updated_at": "2024-05-01T10:00:00Z"
    })
}

pub fn user(role: &str) -> User {
    serde_json::from_value(user_json(role)).expect("Invalid user fixture")
}

fn success(data: Value) -> Response {
    Json(json!({
        "requestId": "req-test",
        "timestamp": "2024-05-01T10:00:00Z",
        "status": "success",
        "data": data
    }))
    .into_response()
}

fn failure(status: StatusCode, code: &str, message: &str) -> Response {
    (
        status,
        Json(json!({
            "requestId": "req-test",
            "timestamp": "2024-05-01T10:00:00Z",
            "status": "error",
            "error": {"code": code, "message": message}
        })),
    )
        .into_response()
}

/// Role behind the request's bearer token.
fn caller_role(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let role = value.strip_prefix("Bearer token-")?;
    matches!(role, "user" | "moderator" | "admin").then(|| role.to_string())
}

fn require_role(headers: &HeaderMap, allowed: &[&str]) -> Result<String, Response> {
    let Some(role) = caller_role(headers) else {
        return Err(failure(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "Unauthorized access"));
    };
    if allowed.contains(&role.as_str()) {
        Ok(role)
    } else {
        Err(failure(StatusCode::FORBIDDEN, "FORBIDDEN", "Insufficient permissions"))
    }
}

/// Recorded `Authorization` headers, in arrival order.
#[derive(Clone, Default)]
struct Recorder {
    auth_headers: Arc<std::sync::Mutex<Vec<Option<String>>>>,
}

async fn login(Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    let role = email.strip_suffix("@example.com").unwrap_or_default();

    if password != PASSWORD || !matches!(role, "user" | "moderator" | "admin") {
        return failure(StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS", "Invalid email or password");
    }
    success(json!({"token": format!("token-{role}"), "user": user_json(role)}))
}

async fn register(Json(body): Json<Value>) -> Response {
    if body["email"] == "taken@example.com" {
        return (
            StatusCode::CONFLICT,
            Json(json!({"success": false, "message": "Email already registered", "request_id": "req-legacy"})),
        )
            .into_response();
    }
    let mut user = user_json("user");
    user["id"] = json!("9d4e2a10-6b3c-4f5d-8e7a-1c2b3d4e5f66");
    user["email"] = body["email"].clone();
    user["username"] = body["username"].clone();
    user["role"] = Value::Null;
    (
        StatusCode::CREATED,
        Json(json!({"success": true, "data": user, "request_id": "req-legacy"})),
    )
        .into_response()
}

async fn profile(State(recorder): State<Recorder>, headers: HeaderMap) -> Response {
    recorder.auth_headers.lock().unwrap().push(
        headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    );
    match require_role(&headers, &["user", "moderator", "admin"]) {
        Ok(role) => success(user_json(&role)),
        Err(response) => response,
    }
}

async fn list_users(headers: HeaderMap, Query(params): Query<HashMap<String, u64>>) -> Response {
    if let Err(response) = require_role(&headers, &["moderator", "admin"]) {
        return response;
    }
    let limit = params.get("limit").copied().unwrap_or(10);
    let offset = params.get("offset").copied().unwrap_or(0);
    let users: Vec<Value> = ["user", "moderator", "admin"]
        .iter()
        .skip(offset as usize)
        .take(limit as usize)
        .map(|r| user_json(r))
        .collect();
    success(json!({"users": users, "total": 3, "limit": limit, "offset": offset}))
}

async fn delete_user(headers: HeaderMap, Path(id): Path<String>) -> Response {
    if let Err(response) = require_role(&headers, &["admin"]) {
        return response;
    }
    if id == user_id("admin") {
        return StatusCode::NOT_FOUND.into_response();
    }
    success(json!({"message": "User deleted successfully"}))
}

async fn stats(headers: HeaderMap) -> Response {
    if let Err(response) = require_role(&headers, &["admin"]) {
        return response;
    }
    success(json!({
        "total_requests": 42,
        "status_codes": {"200": 40, "401": 2},
        "methods": {"GET": 30, "POST": 12},
        "top_paths": {"/api/v1/auth/login": 12},
        "timestamp": "2024-05-01T10:00:00Z"
    }))
}

async fn logs(headers: HeaderMap, Query(params): Query<HashMap<String, u64>>) -> Response {
    if let Err(response) = require_role(&headers, &["admin", "moderator"]) {
        return response;
    }
    let limit = params.get("limit").copied().unwrap_or(100);
    success(json!({
        "logs": [{
            "id": "0e1f2a3b-4c5d-4e6f-8a9b-0c1d2e3f4a5b",
            "request_id": "req-1",
            "method": "GET",
            "path": "/api/v1/users",
            "user_id": user_id("admin"),
            "ip_address": "127.0.0.1",
            "user_agent": "warden-test",
            "status_code": 200,
            "response_time_ms": 4,
            "timestamp": "2024-05-01T10:00:00Z"
        }],
        "count": 1,
        "limit": limit
    }))
}

async fn bad_gateway() -> Response {
    StatusCode::BAD_GATEWAY.into_response()
}

/// A running mock API.
pub struct MockApi {
    pub addr: SocketAddr,
    recorder: Recorder,
}

impl MockApi {
    /// Binds an ephemeral port and serves in the background.
    pub async fn spawn() -> Self {
        let recorder = Recorder::default();
        let api = Router::new()
            .route("/auth/login", post(login))
            .route("/auth/register", post(register))
            .route("/auth/profile", get(profile))
            .route("/users", get(list_users))
            .route("/users/{id}", axum::routing::delete(delete_user))
            .route("/admin/stats", get(stats))
            .route("/admin/logs", get(logs))
            .route("/broken", get(bad_gateway))
            .with_state(recorder.clone());
        let app = Router::new().nest("/api/v1", api);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock API");
        let addr = listener.local_addr().expect("Mock API has no address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock API failed");
        });

        Self { addr, recorder }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api/v1", self.addr)
    }

    /// `Authorization` headers seen by `/auth/profile`.
    pub fn profile_auth_headers(&self) -> Vec<Option<String>> {
        self.recorder.auth_headers.lock().unwrap().clone()
    }
}

/// Test application context
pub struct TestApp {
    pub config: AppConfig,
    pub session: Arc<SessionState>,
    pub rbac: Arc<RbacService>,
    pub navigator: Arc<RecordingNavigator>,
    pub client: ApiClient,
    pub auth: AuthService,
    pub users: UserService,
    pub admin: AdminService,
    pub router: warden_auth::Router,
    data_dir: Arc<TempDir>,
}

impl TestApp {
    /// A fresh application against `api`, with its own token file.
    pub fn new(api: &MockApi) -> Self {
        let data_dir = Arc::new(TempDir::new().expect("Failed to create temp dir"));
        Self::with_data_dir(api, data_dir)
    }

    /// A second application sharing `other`'s token file, as after a restart.
    pub fn restarted(api: &MockApi, other: &TestApp) -> Self {
        Self::with_data_dir(api, other.data_dir.clone())
    }

    fn with_data_dir(api: &MockApi, data_dir: Arc<TempDir>) -> Self {
        let mut config = AppConfig::default();
        config.api.base_url = api.base_url();
        config.api.timeout_seconds = 5;
        config.session.token_file = data_dir
            .path()
            .join("session.json")
            .to_string_lossy()
            .into_owned();

        let store = Arc::new(FileTokenStore::new(&config.session.token_file));
        let session = Arc::new(SessionState::from_config(store, &config.session));
        let rbac = Arc::new(RbacService::new());
        let navigator = Arc::new(RecordingNavigator::new());

        let client = ApiClient::from_config(
            &config.api,
            &config.navigation,
            session.clone(),
            navigator.clone(),
        )
        .expect("Failed to build API client");

        let auth = AuthService::new(
            client.clone(),
            session.clone(),
            navigator.clone(),
            &config.navigation,
        );
        let router = warden_auth::Router::with_default_routes(
            session.clone(),
            rbac.clone(),
            navigator.clone(),
            &config.navigation,
        );

        Self {
            session,
            rbac,
            navigator,
            auth,
            users: UserService::new(client.clone()),
            admin: AdminService::new(client.clone()),
            client,
            router,
            config,
            data_dir,
        }
    }

    /// Logs in as `role` and restores, so the session is initialized.
    pub async fn signed_in(api: &MockApi, role: &str) -> Self {
        let app = Self::new(api);
        app.auth
            .login(&format!("{role}@example.com"), PASSWORD)
            .await
            .expect("Login failed");
        app.session.mark_initialized();
        app
    }
}
