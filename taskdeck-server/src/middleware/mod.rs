//! Request extractors that run before the task handlers.

pub mod validate_task;

pub use validate_task::{ValidatedTask, ValidationError};
