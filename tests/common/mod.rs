//! Mock Sumatra server shared by the integration tests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde_json::{json, Value};

/// Requests the mock received on its edit endpoints.
#[derive(Clone, Default)]
pub struct Captured {
    pub puts: Arc<Mutex<Vec<(String, Option<String>, String)>>>,
}

pub fn record(label: &str, duration: f64, tags: &[&str]) -> Value {
    json!({
        "label": label,
        "reason": "parameter sweep",
        "outcome": "ok",
        "duration": duration,
        "timestamp": "2014-03-02 10:11:12",
        "executable": { "name": "NEURON", "version": "7.3" },
        "repository": { "url": "https://example.org/model" },
        "version": "4f2e1a",
        "main_file": "run.hoc",
        "script_arguments": "sweep.param",
        "tags": tags,
    })
}

fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("application/json"))
        .unwrap_or(false)
}

async fn project_index(
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if !wants_json(&headers) {
        return (StatusCode::NOT_ACCEPTABLE, Json(Value::Null));
    }
    if query.get("tags").map(String::as_str) == Some("fast") {
        return (
            StatusCode::OK,
            Json(json!({ "records": ["/r/3"], "name": "Demo", "tags": "fast" })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "id": "demo",
            "name": "Demo",
            "description": "Mock project",
            "records": ["/r/1", "/r/2"],
            "access": ["anonymous"],
            "tags": null,
        })),
    )
}

async fn private_index(headers: HeaderMap) -> impl IntoResponse {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some("Basic YWxpY2U6c2VjcmV0");
    if !authorized {
        return (StatusCode::UNAUTHORIZED, Json(Value::Null));
    }
    (StatusCode::OK, Json(json!({ "records": ["/r/1"] })))
}

async fn record_by_id(Path(id): Path<u32>) -> impl IntoResponse {
    match id {
        1 => (StatusCode::OK, Json(record("20140302-101112", 1.5, &[]))),
        3 => (StatusCode::OK, Json(record("20140303-090000", 12.0, &["fast", "v2"]))),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, Json(Value::Null)),
    }
}

async fn project_list() -> Json<Value> {
    Json(json!([
        {
            "id": "demo",
            "name": "Demo",
            "description": "Mock project",
            "uri": "http://localhost/demo/",
            "last_updated": "2014-03-02 10:11:12"
        }
    ]))
}

async fn edit_project(
    State(captured): State<Captured>,
    Path(id): Path<u32>,
    headers: HeaderMap,
    body: String,
) -> StatusCode {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    captured
        .puts
        .lock()
        .unwrap()
        .push((format!("/api/project/{id}"), content_type, body));
    if id == 7 {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

pub struct MockServer {
    pub addr: SocketAddr,
    pub captured: Captured,
}

impl MockServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

pub async fn spawn() -> MockServer {
    let captured = Captured::default();
    let app = Router::new()
        .route("/", get(project_list))
        .route("/demo/", get(project_index))
        .route("/private/", get(private_index))
        .route("/r/{id}", get(record_by_id))
        .route("/api/project/{id}", put(edit_project).get(project_index))
        .with_state(captured.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    MockServer { addr, captured }
}
