#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use gatehouse_api::config::ServerConfig;
use gatehouse_api::identity::IdentityBackend;
use gatehouse_api::router::build_app_router;
use gatehouse_api::state::AppState;
use gatehouse_core::session::{IdentityError, IdentityProvider};
use gatehouse_core::types::UserIdentity;

/// Token that resolves to [`alice`].
pub const VALID_TOKEN: &str = "valid-token";
/// Token whose identity check never completes.
pub const HANGING_TOKEN: &str = "hanging-token";
/// Token whose identity check fails.
pub const BROKEN_TOKEN: &str = "broken-token";

pub fn alice() -> UserIdentity {
    UserIdentity::new("u1", "a@x.com")
}

/// Build a test `ServerConfig` with safe defaults and a short render wait.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        session_timeout: None,
        render_wait: Duration::from_millis(100),
        login_path: "/login".to_string(),
        supabase_url: "http://127.0.0.1:9".to_string(),
        supabase_anon_key: "anon-key".to_string(),
        jwt_secret: None,
    }
}

/// Identity backend keyed on fixed token values.
pub struct FakeBackend;

struct FakeProvider(Option<String>);

#[async_trait]
impl IdentityProvider for FakeProvider {
    async fn current_user(&self) -> Result<Option<UserIdentity>, IdentityError> {
        match self.0.as_deref() {
            Some(VALID_TOKEN) => Ok(Some(alice())),
            Some(HANGING_TOKEN) => std::future::pending().await,
            Some(BROKEN_TOKEN) => Err(IdentityError::Transport("connection refused".into())),
            _ => Ok(None),
        }
    }
}

impl IdentityBackend for FakeBackend {
    fn provider_for(&self, access_token: Option<String>) -> Arc<dyn IdentityProvider> {
        Arc::new(FakeProvider(access_token))
    }
}

/// Build the full application router with the fake identity backend.
pub fn build_test_app() -> Router {
    build_test_app_with(test_config())
}

pub fn build_test_app_with(config: ServerConfig) -> Router {
    let state = AppState {
        config: Arc::new(config.clone()),
        identity: Arc::new(FakeBackend),
    };
    build_app_router(state, &config)
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn get_bearer(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::get(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn get_cookie(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::get(uri)
        .header("cookie", format!("sb-access-token={token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn assert_redirect(response: &Response, to: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], to);
}
