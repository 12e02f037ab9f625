//! Body validation for task create/update requests.
//!
//! Implemented as an extractor so a handler taking [`ValidatedTask`] never
//! runs with an invalid body; the rejection is a `400` carrying the first
//! failing rule's message.

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde_json::Value;
use taskdeck_model::{Priority, TaskDraft};
use thiserror::Error;

use crate::infra::errors::AppError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Request body must be a JSON object")]
    NotAnObject,
    #[error("Title is required and must be a valid string")]
    Title,
    #[error("Description is required and must be a valid string")]
    Description,
    #[error("Priority must be 'low', 'medium', or 'high'")]
    Priority,
}

/// A task body that passed validation, already trimmed.
#[derive(Debug, Clone)]
pub struct ValidatedTask(pub TaskDraft);

impl<S> FromRequest<S> for ValidatedTask
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;

        let draft = validate_task_body(&body)?;
        Ok(ValidatedTask(draft))
    }
}

pub fn validate_task_body(body: &Value) -> Result<TaskDraft, ValidationError> {
    let object = body.as_object().ok_or(ValidationError::NotAnObject)?;

    let title = object
        .get("title")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .ok_or(ValidationError::Title)?;

    let description = object
        .get("description")
        .and_then(Value::as_str)
        .filter(|description| !description.is_empty())
        .ok_or(ValidationError::Description)?;

    let priority: Priority = object
        .get("priority")
        .and_then(Value::as_str)
        .and_then(|raw| raw.parse().ok())
        .ok_or(ValidationError::Priority)?;

    let completed = object.get("completed").and_then(Value::as_bool);

    Ok(TaskDraft {
        title: title.to_string(),
        description: description.trim().to_string(),
        priority,
        completed,
    })
}
