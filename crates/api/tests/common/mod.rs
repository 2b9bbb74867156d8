#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use reelflow_core::policy::WorkflowPolicy;
use reelflow_core::roles::Role;
use reelflow_core::types::DbId;
use reelflow_db::models::person::CreatePerson;
use reelflow_db::repositories::PersonRepo;
use reelflow_events::EventBus;
use sqlx::PgPool;
use tower::ServiceExt;

use reelflow_api::auth::jwt::{generate_access_token, JwtConfig};
use reelflow_api::config::ServerConfig;
use reelflow_api::router::build_app_router;
use reelflow_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a fixed JWT secret, and the default workflow policy.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
        policy: WorkflowPolicy::default(),
    }
}

/// Build the full application router over `pool`, exactly as `main.rs` does.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_bus(pool, Arc::new(EventBus::default()))
}

/// Like [`build_test_app`], publishing workflow events onto `bus`.
pub fn build_test_app_with_bus(pool: PgPool, bus: Arc<EventBus>) -> Router {
    let config = Arc::new(test_config());
    let state = AppState::new(pool, Arc::clone(&config), bus);
    build_app_router(state, &config)
}

/// Sign an access token for `person_id` acting as `role`.
pub fn token_for(person_id: DbId, role: Role) -> String {
    generate_access_token(person_id, role.as_str(), &test_config().jwt)
        .expect("token generation should succeed")
}

/// Insert a person and return their id.
pub async fn create_person(pool: &PgPool, email: &str, role: Role, trusted: bool) -> DbId {
    PersonRepo::create(
        pool,
        &CreatePerson {
            email: email.to_string(),
            full_name: email.split('@').next().unwrap_or(email).to_string(),
            role,
            is_trusted_writer: trusted,
        },
    )
    .await
    .expect("person insert should succeed")
    .id
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::get(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
