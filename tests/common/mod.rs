//! Common test utilities and helpers
//!
//! An in-process explorer API served by axum on a random local port.

#![allow(dead_code)]

use axum::extract::{Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use trinav::app::{Action, App, AppEvent};
use trinav::loader::Loader;
use trinav::nav::StalePolicy;

/// How `/health` answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthMode {
    Healthy,
    /// 200 with a status other than `healthy` and no message
    Degraded,
    /// 503 carrying a `message`
    Unavailable,
}

#[derive(Clone)]
struct MockState {
    health: Arc<Mutex<HealthMode>>,
    requests: Arc<Mutex<Vec<String>>>,
}

/// Handle to a running mock explorer API
pub struct MockServer {
    pub base_url: String,
    state: MockState,
}

impl MockServer {
    pub async fn start() -> Self {
        let state = MockState {
            health: Arc::new(Mutex::new(HealthMode::Healthy)),
            requests: Arc::new(Mutex::new(Vec::new())),
        };
        let router = Router::new()
            .route("/api/health", get(health))
            .route("/api/catalogs", get(catalogs))
            .route("/api/schemas", get(schemas))
            .route("/api/tables", get(tables))
            .route("/api/table/details", get(table_details))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base_url: format!("http://{}/api", addr),
            state,
        }
    }

    pub fn set_health(&self, mode: HealthMode) {
        *self.state.health.lock().unwrap() = mode;
    }

    /// Path and query of every request received so far
    pub fn requests(&self) -> Vec<String> {
        self.state.requests.lock().unwrap().clone()
    }
}

/// A base URL nothing listens on
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/api", addr)
}

/// App and loader wired to `base_url`, with the event receiver
pub fn harness(base_url: &str) -> (App, Loader, UnboundedReceiver<AppEvent>) {
    let client = trinav::api::HttpClient::new(base_url, Duration::from_secs(5)).unwrap();
    let (tx, rx) = mpsc::unbounded_channel();
    let loader = Loader::new(Arc::new(client), tx);
    (App::new(base_url, StalePolicy::Discard), loader, rx)
}

/// Run `action` to completion and feed every resulting event to the app.
///
/// Returns the follow-up action of the last event handled.
pub async fn settle(
    app: &mut App,
    loader: &Loader,
    events: &mut UnboundedReceiver<AppEvent>,
    action: Action,
) -> Action {
    let Some(task) = loader.run(action) else {
        return Action::None;
    };
    task.await.unwrap();
    let mut follow_up = Action::None;
    while let Ok(event) = events.try_recv() {
        follow_up = app.handle_event(event).unwrap();
    }
    follow_up
}

fn record(state: &MockState, uri: &Uri) {
    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());
    state.requests.lock().unwrap().push(target);
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn list(key: &str, items: &[&str]) -> Response {
    Json(json!({ key: items })).into_response()
}

async fn health(State(state): State<MockState>, uri: Uri) -> Response {
    record(&state, &uri);
    let mode = *state.health.lock().unwrap();
    match mode {
        HealthMode::Healthy => Json(json!({"status": "healthy"})).into_response(),
        HealthMode::Degraded => Json(json!({"status": "degraded"})).into_response(),
        HealthMode::Unavailable => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"status": "unhealthy", "message": "Trino is unreachable"})),
        )
            .into_response(),
    }
}

async fn catalogs(State(state): State<MockState>, uri: Uri) -> Response {
    record(&state, &uri);
    list("catalogs", &["hive", "iceberg"])
}

async fn schemas(
    State(state): State<MockState>,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    record(&state, &uri);
    let Some(catalog) = params.get("catalog") else {
        return error(StatusCode::BAD_REQUEST, "catalog parameter is required");
    };
    match catalog.as_str() {
        "hive" => list("schemas", &["default", "sales"]),
        "iceberg" | "empty" => list("schemas", &[]),
        "legacy" => Json(json!({"names": ["default"]})).into_response(),
        "mistyped" => Json(json!({"schemas": "default"})).into_response(),
        "broken" => (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response(),
        "slow" => {
            tokio::time::sleep(Duration::from_secs(3)).await;
            list("schemas", &["late"])
        }
        _ => error(StatusCode::NOT_FOUND, "catalog not found"),
    }
}

async fn tables(
    State(state): State<MockState>,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    record(&state, &uri);
    let catalog = params.get("catalog").map(String::as_str);
    let schema = params.get("schema").map(String::as_str);
    match (catalog, schema) {
        (Some("hive"), Some("default")) => list("tables", &["t1", "orders"]),
        (Some("hive"), Some("sales")) => list("tables", &[]),
        (Some(_), Some(_)) => error(StatusCode::NOT_FOUND, "schema not found"),
        _ => error(
            StatusCode::BAD_REQUEST,
            "catalog and schema parameters are required",
        ),
    }
}

async fn table_details(
    State(state): State<MockState>,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    record(&state, &uri);
    let key = (
        params.get("catalog").map(String::as_str),
        params.get("schema").map(String::as_str),
        params.get("table").map(String::as_str),
    );
    match key {
        (Some("hive"), Some("default"), Some("t1")) => Json(json!({
            "columns": [
                {"column_name": "id", "data_type": "bigint", "is_nullable": "NO"},
                {"column_name": "name", "data_type": "varchar", "is_nullable": "YES"},
            ]
        }))
        .into_response(),
        (Some("hive"), Some("default"), Some("orders")) => {
            Json(json!({"columns": Value::Array(Vec::new())})).into_response()
        }
        (Some(_), Some(_), Some(_)) => error(StatusCode::NOT_FOUND, "table not found"),
        _ => error(
            StatusCode::BAD_REQUEST,
            "catalog, schema and table parameters are required",
        ),
    }
}
