//! In-process stand-in for a Supabase project (Auth + PostgREST), served by
//! axum on an ephemeral port.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

pub const SERVICE_KEY: &str = "service-role-key";
pub const VALID_TOKEN: &str = "valid-access-token";

/// A request as seen by the fake server.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub table: String,
    pub query: HashMap<String, String>,
    pub prefer: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
pub struct FakeSupabase {
    pub rows: Vec<Value>,
    pub requests: Vec<Recorded>,
    /// When set, every REST call answers with this status and message.
    pub fail_with: Option<(StatusCode, String)>,
    /// When set, selects answer 200 with this body verbatim.
    pub raw_select: Option<String>,
}

pub type Shared = Arc<Mutex<FakeSupabase>>;

pub fn user_row(id: &str, email: &str, role: &str) -> Value {
    json!({ "id": id, "email": email, "user_role": role, "created_at": "2024-01-01T00:00:00Z" })
}

/// Spawn the fake and return its base URL.
pub async fn spawn(fake: Shared) -> String {
    let app = Router::new()
        .route("/auth/v1/user", get(auth_user))
        .route("/rest/v1/{table}", get(select_rows).patch(update_rows))
        .with_state(fake);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake server");
    });
    format!("http://{addr}")
}

fn authorized(headers: &HeaderMap) -> bool {
    let apikey = headers.get("apikey").and_then(|v| v.to_str().ok());
    let bearer = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    apikey == Some(SERVICE_KEY) && bearer == Some(SERVICE_KEY)
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "code": "PGRST000", "message": message }))).into_response()
}

async fn auth_user(headers: HeaderMap) -> Response {
    let bearer = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    match bearer {
        Some(VALID_TOKEN) => Json(json!({
            "id": "u1",
            "aud": "authenticated",
            "email": "a@x.com",
            "role": "authenticated"
        }))
        .into_response(),
        Some("explode") => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "code": 500, "msg": "database unavailable" })),
        )
            .into_response(),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "code": 401, "msg": "invalid JWT" })),
        )
            .into_response(),
    }
}

fn eq_filter(query: &HashMap<String, String>, column: &str) -> Option<String> {
    query
        .get(column)
        .and_then(|v| v.strip_prefix("eq."))
        .map(str::to_string)
}

async fn select_rows(
    State(fake): State<Shared>,
    Path(table): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let mut fake = fake.lock().unwrap();
    fake.requests.push(Recorded {
        method: "GET".into(),
        table,
        query: query.clone(),
        prefer: None,
        body: None,
    });
    if !authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "Invalid API key");
    }
    if let Some((status, message)) = fake.fail_with.clone() {
        return error(status, &message);
    }

    if let Some(body) = fake.raw_select.clone() {
        return (StatusCode::OK, body).into_response();
    }

    let email = eq_filter(&query, "email");
    let columns: Option<Vec<&str>> = query
        .get("select")
        .filter(|s| s.as_str() != "*")
        .map(|s| s.split(',').collect());
    let rows: Vec<Value> = fake
        .rows
        .iter()
        .filter(|row| email.as_deref().map_or(true, |e| row["email"] == e))
        .map(|row| project(row, columns.as_deref()))
        .collect();
    Json(rows).into_response()
}

/// Keep only the selected columns, like PostgREST's `select=`.
fn project(row: &Value, columns: Option<&[&str]>) -> Value {
    match (columns, row.as_object()) {
        (Some(columns), Some(object)) => Value::Object(
            object
                .iter()
                .filter(|(key, _)| columns.contains(&key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        ),
        _ => row.clone(),
    }
}

async fn update_rows(
    State(fake): State<Shared>,
    Path(table): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    Json(fields): Json<Value>,
) -> Response {
    let mut fake = fake.lock().unwrap();
    fake.requests.push(Recorded {
        method: "PATCH".into(),
        table,
        query: query.clone(),
        prefer: headers
            .get("prefer")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: Some(fields.clone()),
    });
    if !authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "Invalid API key");
    }
    if let Some((status, message)) = fake.fail_with.clone() {
        return error(status, &message);
    }

    let id = eq_filter(&query, "id");
    for row in fake.rows.iter_mut() {
        if id.as_deref().is_some_and(|id| row["id"] == id) {
            if let (Some(row), Some(fields)) = (row.as_object_mut(), fields.as_object()) {
                for (key, value) in fields {
                    row.insert(key.clone(), value.clone());
                }
            }
        }
    }
    StatusCode::NO_CONTENT.into_response()
}
