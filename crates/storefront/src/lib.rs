//! Vitrine storefront library.
//!
//! Server-rendered product catalog with a session cart and hosted sign-in.
//! The router is built by [`app`] so integration tests can drive it without
//! binding a socket.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod components;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::{Router, body::Body, middleware::from_fn, middleware::from_fn_with_state, routing::get};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::middleware::request_id::make_request_span;
use crate::state::AppState;

/// Directory static assets are served from, relative to the workspace root.
pub const STATIC_DIR: &str = "crates/storefront/static";

/// Build the storefront router with its middleware stack.
///
/// Sentry layers are not included; the binary adds them outermost.
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(session_layer)
        .layer(from_fn_with_state(
            state.clone(),
            middleware::security_headers_middleware,
        ))
        .layer(from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<Body>))
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
