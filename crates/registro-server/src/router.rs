//! Router assembly for the registry HTTP API.
//!
//! [`build_router`] wires the handlers to their routes with panic recovery,
//! CORS and tracing middleware layers.

use axum::routing::get;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::panic_response;
use crate::handlers;
use crate::state::AppState;

/// Builds the complete axum router with all API routes.
///
/// CatchPanicLayer is innermost so a panicking handler still gets the
/// standard 500 body and is traced like any other response.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/estudiantes",
            get(handlers::students::list_students).post(handlers::students::create_student),
        )
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
