pub mod tasks;

use crate::AppState;
use axum::Router;

/// Create the API router.
pub fn create_api_router() -> Router<AppState> {
    Router::new().merge(tasks::create_tasks_router())
}
