//! Router assembly for the relay HTTP API.
//!
//! [`build_router`] wires the handlers to their routes with CORS and tracing
//! middleware layers.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Builds the axum router.
///
/// CORS is permissive (any origin, method and header) so a front-end dev
/// server on another port can call the relay. Not a production setting.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/chat", post(handlers::chat::chat))
        .route("/health", get(handlers::health::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
