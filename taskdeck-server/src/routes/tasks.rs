use axum::{
    Router,
    routing::{get, patch, put},
};

use crate::{AppState, handlers::tasks};

pub fn create_tasks_router() -> Router<AppState> {
    Router::new()
        .route("/api/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route(
            "/api/tasks/{id}",
            put(tasks::update_task).delete(tasks::delete_task),
        )
        .route("/api/tasks/{id}/toggle", patch(tasks::toggle_task))
}
