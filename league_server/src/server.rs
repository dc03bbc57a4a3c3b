//! HTTP server exposing player scores and the league table.

use anyhow::{Context, Result};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, instrument};

use crate::{
    middleware::{
        create_body_limit_layer, create_cors_layer, create_rate_limiter,
        rate_limit_middleware, request_logging_middleware, AppRateLimiter,
    },
    settings::Settings,
    store::{League, PlayerStore},
};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PlayerStore>,
    pub rate_limiter: Arc<AppRateLimiter>,
    pub settings: Settings,
}

impl AppState {
    pub fn new(store: Arc<dyn PlayerStore>, settings: Settings) -> Self {
        Self {
            store,
            rate_limiter: create_rate_limiter(&settings.server),
            settings,
        }
    }
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    players: usize,
}

/// Create the HTTP router with all endpoints and middleware
pub fn create_router(state: AppState) -> Router {
    let cors_layer = create_cors_layer(&state.settings.server);
    let body_limit_layer = create_body_limit_layer(state.settings.server.max_request_size_kb);

    Router::new()
        .route("/health", get(health_check))
        .route("/league", get(league))
        .route("/players/:name", get(show_score).post(process_win))
        .with_state(state.clone())
        .layer(middleware::from_fn_with_state(
            state.rate_limiter.clone(),
            rate_limit_middleware,
        ))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(cors_layer)
        .layer(body_limit_layer)
}

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        players: state.store.get_league().len(),
    })
}

/// League table, most wins first
#[instrument(skip(state))]
async fn league(State(state): State<AppState>) -> Json<League> {
    Json(state.store.get_league())
}

/// Win count for one player; 404 when it is zero
#[instrument(skip(state))]
async fn show_score(State(state): State<AppState>, Path(name): Path<String>) -> impl IntoResponse {
    let score = state.store.get_player_score(&name);

    let status = if score == 0 {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    };

    (status, score.to_string())
}

/// Record a win for one player
#[instrument(skip(state))]
async fn process_win(State(state): State<AppState>, Path(name): Path<String>) -> StatusCode {
    let store = state.store.clone();
    let player = name.clone();

    match tokio::task::spawn_blocking(move || store.record_win(&player)).await {
        Ok(Ok(())) => {
            info!("Recorded win for {}", name);
            StatusCode::ACCEPTED
        }
        Ok(Err(e)) => {
            error!("Failed to record win for {}: {}", name, e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
        Err(e) => {
            error!("Win recording task for {} failed: {}", name, e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Start the HTTP server and wait for shutdown signal
pub async fn serve(store: Arc<dyn PlayerStore>, settings: &Settings) -> Result<()> {
    let addr = settings.bind_addr();
    let app = create_router(AppState::new(store, settings.clone()));

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind HTTP server to {}", addr))?;

    info!("HTTP server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown())
        .await
        .context("HTTP server error")?;

    info!("HTTP server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C, or SIGTERM on unix)
async fn wait_for_shutdown() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT (Ctrl+C), shutting down gracefully"),
        _ = terminate => info!("Received SIGTERM, shutting down gracefully"),
    }
}
