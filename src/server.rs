use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::JwtKeys;
use crate::config::{AppConfig, Environment, StorageBackend};
use crate::database::{DatabaseManager, PgCommonsRepository, PgUserCommonsRepository};
use crate::handlers::{self, commons};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

/// Router with every route and the JWT layer, without transport middleware
pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        // Authenticated API
        .merge(commons_routes(state.clone()))
        .with_state(state)
}

fn commons_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/commons/all", get(commons::commons_list))
        .route("/api/commons/new", post(commons::commons_create))
        .route("/api/commons/delete", delete(commons::commons_delete))
        .route("/api/commons/join", post(commons::commons_join))
        .route(
            "/api/commons",
            get(commons::commons_show).put(commons::commons_edit),
        )
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

/// `app` plus tracing, CORS and body-size limits from config
pub fn app_with_middleware(state: AppState, config: &AppConfig) -> Router {
    let mut router = app(state).layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    if config.security.enable_cors {
        router = router.layer(cors_layer(config));
    }

    if config.api.enable_request_logging {
        router = router.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));
    }

    router
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    if config.environment == Environment::Development {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build repositories for the configured storage backend
pub async fn build_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let jwt = JwtKeys::new(&config.security.jwt_secret, config.security.jwt_expiry_hours)
        .context("invalid JWT configuration")?;

    match config.storage {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            Ok(AppState::in_memory(jwt))
        }
        StorageBackend::Postgres => {
            let db = DatabaseManager::connect(&config.database)
                .await
                .context("failed to connect to database")?;
            db.migrate().await.context("failed to prepare database schema")?;

            Ok(AppState::new(
                Arc::new(PgCommonsRepository::new(db.pool())),
                Arc::new(PgUserCommonsRepository::new(db.pool())),
                jwt,
            ))
        }
    }
}

/// Bind and serve until the process receives ctrl-c
pub async fn serve(config: &AppConfig) -> anyhow::Result<()> {
    config.validate()?;

    let state = build_state(config).await?;
    let app = app_with_middleware(state, config);

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!(
        "Commons API listening on http://{} ({:?} storage, {:?} mode)",
        bind_addr,
        config.storage,
        config.environment
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
