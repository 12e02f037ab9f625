//! # taskdeck server
//!
//! Keeps tasks in memory and serves them over a small JSON API:
//!
//! - `GET /api/tasks` filtered, paginated listing (the carousel's page source)
//! - `POST /api/tasks`, `PUT /api/tasks/{id}` validated create/update
//! - `DELETE /api/tasks/{id}`, `PATCH /api/tasks/{id}/toggle`
//! - `GET /health`

pub mod handlers;
pub mod infra;
pub mod middleware;
pub mod routes;

pub use infra::app_state::AppState;
pub use infra::errors::{AppError, AppResult};
pub use infra::store::{StoreError, TaskStore};

use axum::{Router, routing::get};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Build the full application router with middleware layers applied.
pub fn create_app(state: AppState) -> Router {
    let cors_layer = infra::startup::build_cors_layer(&state.config().cors);

    Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(routes::create_api_router())
        // Outer to inner: tracing, then CORS
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer),
        )
        .with_state(state)
}
