#![allow(dead_code)]

use axum::{
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use genity_service::config::{DatabaseConfig, GenityConfig, JwtConfig};
use genity_service::models::Genity;
use genity_service::services::InMemoryGenityRepository;
use genity_service::{build_router, AppState};
use secrecy::Secret;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt;

pub const TEST_VERSION: &str = "0.9.0";
pub const TEST_USER_ID: &str = "100";

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("Failed to parse JSON body")
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub token: String,
}

pub fn test_config() -> GenityConfig {
    GenityConfig {
        common: CoreConfig::default(),
        database: DatabaseConfig {
            url: Secret::new("postgres://unused".to_string()),
            max_connections: 1,
            min_connections: 0,
        },
        jwt: JwtConfig {
            signing_key: Secret::new("test-signing-key".to_string()),
            expiration_hours: 1,
        },
        version: TEST_VERSION.to_string(),
    }
}

pub fn genity(id: &str, name: &str) -> Genity {
    let now = Utc::now();
    Genity {
        id: id.to_string(),
        name: name.to_string(),
        created_at: now,
        updated_at: now,
    }
}

impl TestApp {
    /// Router over an in-memory repository seeded with `items`.
    pub fn spawn(items: Vec<Genity>) -> Self {
        let config = test_config();
        let repository = Arc::new(InMemoryGenityRepository::with_items(items));
        let state = AppState::new(&config, repository);
        let router = build_router(state.clone(), Duration::from_secs(5));
        let token = state
            .jwt
            .generate_access_token(TEST_USER_ID, "demo")
            .expect("Failed to generate token");

        Self {
            router,
            state,
            token,
        }
    }

    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<&str>,
        authorization: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(auth) = authorization {
            builder = builder.header("Authorization", auth);
        }
        if body.is_some() {
            builder = builder.header("content-type", "application/json");
        }
        let request = builder
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None, None).await
    }
}
