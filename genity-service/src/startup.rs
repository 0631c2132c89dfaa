//! Application startup and lifecycle management.

use crate::config::GenityConfig;
use crate::handlers;
use crate::middleware::auth_middleware;
use crate::services::{GenityRepository, GenityService, JwtService, PgGenityRepository};
use axum::middleware::{from_fn, from_fn_with_state};
use axum::{
    routing::{get, post, put},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware,
    tracing::{make_request_span, request_id_middleware},
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub genitys: GenityService,
    pub jwt: JwtService,
    pub version: Arc<str>,
}

impl AppState {
    pub fn new(config: &GenityConfig, repository: Arc<dyn GenityRepository>) -> Self {
        Self {
            genitys: GenityService::new(repository),
            jwt: JwtService::new(&config.jwt),
            version: Arc::from(config.version.as_str()),
        }
    }
}

/// Builds the HTTP router. Reads are public; writes require a bearer token.
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    // layered per method so unsupported methods still get 405, not 401
    let auth = from_fn_with_state(state.clone(), auth_middleware);

    Router::new()
        .route("/healthcheck", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route(
            "/genitys",
            get(handlers::query_genitys)
                .merge(post(handlers::create_genity).route_layer(auth.clone())),
        )
        .route(
            "/genitys/:id",
            get(handlers::get_genity).merge(
                put(handlers::update_genity)
                    .delete(handlers::delete_genity)
                    .route_layer(auth),
            ),
        )
        .layer(from_fn(metrics_middleware))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: GenityConfig) -> Result<Self, AppError> {
        let repository = PgGenityRepository::connect(&config.database)
            .await
            .map_err(|e| {
                tracing::error!("Failed to connect to PostgreSQL: {}", e);
                e
            })?;

        let state = AppState::new(&config, Arc::new(repository));
        let router = build_router(state, config.common.request_timeout());

        // port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(port = port, version = %config.version, "Genity service listening");

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
