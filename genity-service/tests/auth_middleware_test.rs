mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use common::test_config;
use genity_service::middleware::{auth_middleware, AuthUser};
use genity_service::services::InMemoryGenityRepository;
use genity_service::AppState;
use std::sync::Arc;
use tower::util::ServiceExt;

#[tokio::test]
async fn test_auth_middleware() {
    // 1. Setup
    let config = test_config();
    let state = AppState::new(&config, Arc::new(InMemoryGenityRepository::new()));
    let jwt = state.jwt.clone();

    // 2. Build App with Middleware
    let app = Router::new()
        .route(
            "/protected",
            get(|AuthUser(claims): AuthUser| async move { claims.sub }),
        )
        .layer(from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state);

    // 3. Test: Missing Authorization Header
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/protected")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // 4. Test: Invalid Token
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/protected")
                .header("Authorization", "Bearer invalid_token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // 5. Test: Valid Token, principal reaches the handler
    let token = jwt.generate_access_token("user_123", "demo").unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/protected")
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"user_123");
}

#[tokio::test]
async fn auth_user_without_middleware_is_unauthorized() {
    let app: Router = Router::new().route(
        "/unguarded",
        get(|AuthUser(claims): AuthUser| async move { claims.sub }),
    );

    let response = app
        .oneshot(
            Request::builder()
                .uri("/unguarded")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
