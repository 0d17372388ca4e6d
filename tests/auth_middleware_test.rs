use std::env;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::get,
    Router,
};
use eta_backend::middleware::auth::Claims;
use jsonwebtoken::{encode, EncodingKey, Header};
use tower::ServiceExt;
use uuid::Uuid;

const JWT_SECRET: &str = "test_secret_key";

fn init_test_config() {
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    env::set_var("DATABASE_URL", "postgres://localhost/eta_test");
    env::set_var("JWT_SECRET", JWT_SECRET);
    env::set_var("WEBHOOK_SECRET", "whsec_test");
    env::set_var("LEARNER_RPS", "100");
    env::set_var("STAFF_RPS", "100");
    env::set_var("PRACTICE_HOURS_GOAL", "50");
    env::set_var("NIGHT_HOURS_GOAL", "10");
    // Other tests in this binary may have initialized it already.
    let _ = eta_backend::config::init_config();
}

fn token_for(role: &str) -> String {
    let claims = Claims {
        sub: Uuid::new_v4().to_string(),
        exp: (chrono::Utc::now().timestamp() + 3600) as usize,
        role: Some(role.to_string()),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("encode token")
}

async fn ok_handler() -> &'static str {
    "ok"
}

fn learner_router() -> Router {
    Router::new().route("/protected", get(ok_handler)).layer(
        axum::middleware::from_fn(eta_backend::middleware::auth::require_auth),
    )
}

fn staff_router() -> Router {
    Router::new().route("/staff-only", get(ok_handler)).layer(
        axum::middleware::from_fn(eta_backend::middleware::auth::require_staff),
    )
}

#[tokio::test]
async fn missing_token_is_rejected_before_any_logic() {
    init_test_config();
    let resp = learner_router()
        .oneshot(Request::builder().uri("/protected").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    init_test_config();
    let resp = learner_router()
        .oneshot(
            Request::builder()
                .uri("/protected")
                .header("authorization", "Bearer not.a.token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn valid_learner_token_passes() {
    init_test_config();
    let resp = learner_router()
        .oneshot(
            Request::builder()
                .uri("/protected")
                .header("authorization", format!("Bearer {}", token_for("learner")))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn learner_token_cannot_reach_staff_surface() {
    init_test_config();
    let resp = staff_router()
        .oneshot(
            Request::builder()
                .uri("/staff-only")
                .header("authorization", format!("Bearer {}", token_for("learner")))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn coach_token_reaches_staff_surface() {
    init_test_config();
    let resp = staff_router()
        .oneshot(
            Request::builder()
                .uri("/staff-only")
                .header("authorization", format!("Bearer {}", token_for("coach")))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
