//! Task CRUD endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use taskdeck_model::{DeleteTaskResponse, StatusFilter, Task, TaskId, TaskPage};
use tracing::{debug, info};

use crate::{
    AppState,
    infra::errors::{AppError, AppResult},
    middleware::ValidatedTask,
};

/// Raw query string values; parsed leniently so a bad `page` falls back to
/// the first page instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListTasksQuery {
    pub status: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListTasksQuery {
    pub fn filter(&self) -> StatusFilter {
        StatusFilter::from_query(self.status.as_deref())
    }

    pub fn page(&self) -> u32 {
        parse_positive(self.page.as_deref()).unwrap_or(1)
    }

    /// Requested page size, or `default` when absent or unusable.
    pub fn limit(&self, default: u32) -> u32 {
        parse_positive(self.limit.as_deref()).unwrap_or(default.max(1))
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u32> {
    let value = raw?.trim().parse::<i64>().ok()?;
    if value < 1 {
        return None;
    }
    Some(u32::try_from(value).unwrap_or(u32::MAX))
}

fn parse_task_id(raw: &str) -> AppResult<TaskId> {
    raw.parse().map_err(|_| AppError::task_not_found())
}

pub async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<ListTasksQuery>,
) -> Json<TaskPage> {
    let filter = query.filter();
    let limit = query.limit(state.config().carousel.page_size);
    let page = state.store().list(filter, query.page(), limit);

    debug!(
        status = %filter,
        page = page.page,
        limit = page.limit,
        returned = page.tasks.len(),
        total = page.total,
        has_more = page.has_more,
        "listed tasks"
    );

    Json(page)
}

pub async fn create_task(
    State(state): State<AppState>,
    ValidatedTask(draft): ValidatedTask,
) -> (StatusCode, Json<Task>) {
    let task = state.store().create(draft);
    info!(task_id = %task.id, priority = %task.priority, "task created");
    (StatusCode::CREATED, Json(task))
}

pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedTask(draft): ValidatedTask,
) -> AppResult<Json<Task>> {
    let id = parse_task_id(&id)?;
    let task = state.store().update(id, draft)?;
    info!(task_id = %task.id, "task updated");
    Ok(Json(task))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteTaskResponse>> {
    let id = parse_task_id(&id)?;
    let task = state.store().delete(id)?;
    info!(task_id = %task.id, "task deleted");
    Ok(Json(DeleteTaskResponse::deleted(task)))
}

pub async fn toggle_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Task>> {
    let id = parse_task_id(&id)?;
    let task = state.store().toggle(id)?;
    info!(task_id = %task.id, completed = task.completed, "task toggled");
    Ok(Json(task))
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskdeck_config::models::DEFAULT_PAGE_SIZE;

    fn query(page: Option<&str>, limit: Option<&str>) -> ListTasksQuery {
        ListTasksQuery {
            status: None,
            page: page.map(str::to_string),
            limit: limit.map(str::to_string),
        }
    }

    #[test]
    fn pagination_params_fall_back_when_unusable() {
        assert_eq!(query(None, None).page(), 1);
        assert_eq!(query(None, None).limit(DEFAULT_PAGE_SIZE), DEFAULT_PAGE_SIZE);
        assert_eq!(query(Some("abc"), Some("0")).page(), 1);
        assert_eq!(
            query(Some("abc"), Some("0")).limit(DEFAULT_PAGE_SIZE),
            DEFAULT_PAGE_SIZE
        );
        assert_eq!(query(Some("-4"), Some("-1")).page(), 1);
        assert_eq!(query(Some("3"), Some("5")).page(), 3);
        assert_eq!(query(Some("3"), Some("5")).limit(DEFAULT_PAGE_SIZE), 5);
        assert_eq!(query(None, None).limit(7), 7);
        assert_eq!(query(None, None).limit(0), 1);
    }
}
