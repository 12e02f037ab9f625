use chrono::{DateTime, Utc};

use crate::filter_types::{Priority, StatusFilter};
use crate::ids::TaskId;

/// A single task record as stored by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub priority: Priority,
}

impl Task {
    /// Build a fresh, pending task from a validated draft.
    pub fn from_draft(id: TaskId, draft: TaskDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            completed: false,
            created_at,
            priority: draft.priority,
        }
    }

    /// Merge an update into this task. `id` and `created_at` are kept;
    /// `completed` only changes when the draft carries a value.
    pub fn apply_draft(&mut self, draft: TaskDraft) {
        self.title = draft.title;
        self.description = draft.description;
        self.priority = draft.priority;
        if let Some(completed) = draft.completed {
            self.completed = completed;
        }
    }

    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    pub fn matches(&self, filter: StatusFilter) -> bool {
        filter.matches(self)
    }
}

/// Validated create/update payload.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub completed: Option<bool>,
}

impl TaskDraft {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            priority,
            completed: None,
        }
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }
}

/// Body returned by `DELETE /api/tasks/{id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeleteTaskResponse {
    pub message: String,
    pub task: Task,
}

impl DeleteTaskResponse {
    pub fn deleted(task: Task) -> Self {
        Self {
            message: "Task deleted successfully".to_string(),
            task,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Task {
        Task::from_draft(
            TaskId(3),
            TaskDraft::new("Write report", "Quarterly numbers", Priority::High),
            Utc::now(),
        )
    }

    #[test]
    fn drafts_create_pending_tasks() {
        let task = sample();
        assert!(!task.completed);
        assert_eq!(task.id, TaskId(3));
        assert!(task.matches(StatusFilter::Pending));
        assert!(!task.matches(StatusFilter::Completed));
    }

    #[test]
    fn apply_draft_keeps_identity_and_completion_unless_given() {
        let mut task = sample();
        let created_at = task.created_at;
        task.toggle();

        task.apply_draft(TaskDraft::new("Renamed", "Still here", Priority::Low));
        assert_eq!(task.id, TaskId(3));
        assert_eq!(task.created_at, created_at);
        assert_eq!(task.title, "Renamed");
        assert!(task.completed);

        task.apply_draft(
            TaskDraft::new("Renamed", "Still here", Priority::Low)
                .with_completed(false),
        );
        assert!(!task.completed);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_with_camel_case_timestamp() {
        let value = serde_json::to_value(sample()).unwrap();
        assert!(value.get("createdAt").is_some());
        assert_eq!(value["priority"], "high");
        assert_eq!(value["id"], 3);
    }
}
