//! `boolex serve` -- HTTP JSON API for stored boolean expressions.
//!
//! Exposes the expression engine and storage as an async HTTP service
//! using `axum` + `tokio`. The engine itself is stateless and CPU-bound,
//! so handlers call it inline from any number of workers.
//!
//! Security features:
//! - CORS headers on all responses (permissive for local dev)
//! - Per-IP rate limiting (default: 60 req/min, configurable)
//! - Optional API key authentication via BOOLEX_API_KEY env var
//!
//! Endpoints:
//! - GET  /health                        - Server status (exempt from auth)
//! - POST /expressions                   - Validate and store an expression
//! - GET  /expressions                   - List stored expressions
//! - PUT  /expressions/{id}              - Validate and replace an expression
//! - GET  /expressions/{id}/parameters   - Parameter set of an expression
//! - GET  /evaluate/{id}?x=1&y=0         - Evaluate against integer bindings
//!
//! All responses use Content-Type: application/json.

mod handlers;
mod middleware;
mod state;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{middleware as axum_middleware, Json, Router};
use boolex_storage::MemoryStorage;
use tower_http::cors::{Any, CorsLayer};

use self::handlers::{
    handle_create, handle_evaluate, handle_health, handle_list, handle_not_found,
    handle_parameters, handle_update,
};
use self::middleware::{require_api_key, throttle};
use self::state::{AppState, RateLimiter};
use crate::service::ExpressionService;

/// Maximum request body size: 64 KB. Expression payloads are tiny.
const MAX_BODY_SIZE: usize = 64 * 1024;

/// Default rate limit: 60 requests per minute per IP.
const DEFAULT_RATE_LIMIT: u64 = 60;

/// Rate limit window duration in seconds (1 minute).
const RATE_LIMIT_WINDOW_SECS: u64 = 60;

/// Construct a JSON error response with the given status code and message.
fn json_error(status: StatusCode, message: &str) -> impl IntoResponse {
    (status, Json(serde_json::json!({"error": message})))
}

/// Start the HTTP server on the given port.
///
/// Security:
/// - CORS: Permissive (`Any` origin) for local dev; tighten for production.
/// - Rate limit: Per-IP, from `BOOLEX_RATE_LIMIT` env var (default 60 req/min).
/// - API key: If `BOOLEX_API_KEY` env var is set, all endpoints except
///   /health require auth.
pub async fn start_server(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let rate_limit = std::env::var("BOOLEX_RATE_LIMIT")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(DEFAULT_RATE_LIMIT);

    let api_key = std::env::var("BOOLEX_API_KEY")
        .ok()
        .filter(|k| !k.is_empty());

    if api_key.is_some() {
        eprintln!("API key authentication enabled");
    }
    eprintln!("Rate limit: {} requests per minute per IP", rate_limit);

    let state = Arc::new(AppState {
        service: ExpressionService::new(MemoryStorage::new()),
        rate_limiter: RateLimiter::new(rate_limit),
        api_key,
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers(Any);

    // /health is mounted outside the key-guarded sub-router, so the auth
    // exemption falls out of the router shape.
    let api = Router::new()
        .route("/expressions", post(handle_create).get(handle_list))
        .route("/expressions/{id}", put(handle_update))
        .route("/expressions/{id}/parameters", get(handle_parameters))
        .route("/evaluate/{id}", get(handle_evaluate))
        .fallback(handle_not_found)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ));

    let app = Router::new()
        .route("/health", get(handle_health))
        .merge(api)
        .layer(axum_middleware::from_fn_with_state(state.clone(), throttle))
        .layer(cors)
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .with_state(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    eprintln!("Boolex API listening on http://0.0.0.0:{}", port);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    eprintln!("\nServer shut down.");
    Ok(())
}

/// Wait for a shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
    eprintln!("\nReceived shutdown signal...");
}
