//! In-memory task store.
//!
//! A single ordered `Vec` behind a `parking_lot::RwLock`. Insertion order is
//! the listing order; ids are allocated sequentially and never reused, even
//! after deletes.

use chrono::Utc;
use parking_lot::RwLock;
use taskdeck_model::{StatusFilter, Task, TaskDraft, TaskId, TaskPage};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("task {0} not found")]
    NotFound(TaskId),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
struct StoreInner {
    tasks: Vec<Task>,
    next_id: TaskId,
}

#[derive(Debug)]
pub struct TaskStore {
    inner: RwLock<StoreInner>,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner {
                tasks: Vec::new(),
                next_id: TaskId::new(1),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Filter first, then slice out the requested page.
    pub fn list(&self, filter: StatusFilter, page: u32, limit: u32) -> TaskPage {
        let inner = self.inner.read();
        let filtered: Vec<Task> = inner
            .tasks
            .iter()
            .filter(|task| filter.matches(task))
            .cloned()
            .collect();
        TaskPage::paginate(&filtered, page, limit)
    }

    pub fn get(&self, id: TaskId) -> StoreResult<Task> {
        self.inner
            .read()
            .tasks
            .iter()
            .find(|task| task.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    pub fn create(&self, draft: TaskDraft) -> Task {
        let mut inner = self.inner.write();
        let id = inner.next_id;
        inner.next_id = id.next();

        let task = Task::from_draft(id, draft, Utc::now());
        inner.tasks.push(task.clone());
        task
    }

    pub fn update(&self, id: TaskId, draft: TaskDraft) -> StoreResult<Task> {
        let mut inner = self.inner.write();
        let task = inner
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(StoreError::NotFound(id))?;
        task.apply_draft(draft);
        Ok(task.clone())
    }

    pub fn delete(&self, id: TaskId) -> StoreResult<Task> {
        let mut inner = self.inner.write();
        let index = inner
            .tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(StoreError::NotFound(id))?;
        Ok(inner.tasks.remove(index))
    }

    pub fn toggle(&self, id: TaskId) -> StoreResult<Task> {
        let mut inner = self.inner.write();
        let task = inner
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(StoreError::NotFound(id))?;
        task.toggle();
        Ok(task.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskdeck_model::Priority;

    fn draft(title: &str) -> TaskDraft {
        TaskDraft::new(title, "details", Priority::Medium)
    }

    #[test]
    fn ids_are_sequential_and_not_reused() {
        let store = TaskStore::new();
        let first = store.create(draft("a"));
        let second = store.create(draft("b"));
        assert_eq!(first.id, TaskId(1));
        assert_eq!(second.id, TaskId(2));

        store.delete(second.id).unwrap();
        let third = store.create(draft("c"));
        assert_eq!(third.id, TaskId(3));
    }

    #[test]
    fn filter_applies_before_pagination() {
        let store = TaskStore::new();
        for i in 0..10 {
            let task = store.create(draft(&format!("task {i}")));
            if i % 2 == 0 {
                store.toggle(task.id).unwrap();
            }
        }

        let completed = store.list(StatusFilter::Completed, 1, 3);
        assert_eq!(completed.total, 5);
        assert_eq!(completed.tasks.len(), 3);
        assert!(completed.tasks.iter().all(|t| t.completed));
        assert!(completed.has_more);

        let second = store.list(StatusFilter::Completed, 2, 3);
        assert_eq!(second.tasks.len(), 2);
        assert!(!second.has_more);

        let pending = store.list(StatusFilter::Pending, 1, 20);
        assert_eq!(pending.total, 5);
        assert!(pending.tasks.iter().all(|t| !t.completed));
    }

    #[test]
    fn missing_ids_report_not_found() {
        let store = TaskStore::new();
        assert_eq!(store.toggle(TaskId(9)), Err(StoreError::NotFound(TaskId(9))));
        assert_eq!(store.delete(TaskId(9)), Err(StoreError::NotFound(TaskId(9))));
        assert!(store.update(TaskId(9), draft("x")).is_err());
        assert!(store.get(TaskId(9)).is_err());
    }

    #[test]
    fn update_keeps_completion_when_not_supplied() {
        let store = TaskStore::new();
        let task = store.create(draft("a"));
        store.toggle(task.id).unwrap();

        let updated = store.update(task.id, draft("renamed")).unwrap();
        assert_eq!(updated.title, "renamed");
        assert!(updated.completed);
        assert_eq!(updated.created_at, task.created_at);
    }
}
