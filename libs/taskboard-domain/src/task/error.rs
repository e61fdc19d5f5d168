//! Domain errors for task operations
//!
//! Expected failures travel as values (`Result<T>`); nothing in the domain or
//! service layer panics for a bad request.

use thiserror::Error;

use super::ids::TaskId;

/// Errors that can occur while creating, loading or mutating tasks
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// Input failed a Guard check
    #[error("Validation failed: {0}")]
    Validation(String),

    /// No task with this id is stored
    #[error("Task {0} not found")]
    NotFound(TaskId),

    /// A task with this id is already stored
    #[error("Task with id {0} already exists")]
    DuplicateId(TaskId),

    /// `mark_as_resolved` on a completed task
    #[error("Task already completed")]
    AlreadyCompleted,

    /// Mutation attempted on a deleted task
    #[error("Cannot complete a deleted task")]
    DeletedTask,

    /// `delete` on a task that is already deleted
    #[error("Task already deleted")]
    AlreadyDeleted,

    /// The storage backend failed
    #[error("Storage operation failed: {0}")]
    StorageFailure(String),

    /// A stored record could not be turned back into a Task
    #[error("Corrupted task record: {0}")]
    CorruptRecord(String),

    /// Anything else
    #[error("Internal error: {0}")]
    Unexpected(String),
}

/// Coarse category of a [`TaskError`], used by boundary adapters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Storage,
    Unexpected,
}

impl TaskError {
    /// Create a validation error with a message
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a storage failure error with a message
    pub fn storage_failure(msg: impl Into<String>) -> Self {
        Self::StorageFailure(msg.into())
    }

    /// Create a corrupt record error with a message
    pub fn corrupt_record(msg: impl Into<String>) -> Self {
        Self::CorruptRecord(msg.into())
    }

    /// Create an unexpected error with a message
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::Unexpected(msg.into())
    }

    /// The category this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::DuplicateId(_)
            | Self::AlreadyCompleted
            | Self::DeletedTask
            | Self::AlreadyDeleted => ErrorKind::Conflict,
            Self::StorageFailure(_) | Self::CorruptRecord(_) => ErrorKind::Storage,
            Self::Unexpected(_) => ErrorKind::Unexpected,
        }
    }
}

/// Result type alias for task operations
pub type Result<T> = std::result::Result<T, TaskError>;
