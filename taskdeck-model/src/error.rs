use std::fmt::{self, Display};

/// Errors produced by model constructors and parsing routines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    InvalidPriority(String),
    InvalidStatus(String),
    InvalidTaskId(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::InvalidPriority(raw) => {
                write!(f, "invalid priority '{raw}': expected low, medium or high")
            }
            ModelError::InvalidStatus(raw) => write!(
                f,
                "invalid status '{raw}': expected all, completed or pending"
            ),
            ModelError::InvalidTaskId(raw) => write!(f, "invalid task id '{raw}'"),
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
