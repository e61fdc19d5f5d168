//! The Task aggregate
//!
//! A Task is a titled unit of work that can be resolved once and deleted once.
//! It enforces its own invariants; persistence never mutates it directly.

use super::{
    error::{Result, TaskError},
    guard,
    ids::TaskId,
};

/// Input accepted by [`Task::create`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTaskProps {
    pub title: Option<String>,
}

impl CreateTaskProps {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
        }
    }
}

/// Externally visible lifecycle state of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    Open,
    Resolved,
}

/// Task aggregate root
///
/// Invariants:
/// - `title` is non-empty after trimming (checked at construction)
/// - `completed` goes false → true at most once, never on a deleted task
/// - `deleted` goes false → true at most once
///
/// # Example
///
/// ```rust
/// use taskboard_domain::task::{CreateTaskProps, Task};
///
/// let mut task = Task::create(CreateTaskProps::titled("Buy milk"), None).unwrap();
/// task.mark_as_resolved().unwrap();
/// assert!(task.is_completed());
/// assert!(task.mark_as_resolved().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    title: String,
    completed: bool,
    deleted: bool,
}

impl Task {
    /// Validate the props and build an open task
    ///
    /// Uses `id` when supplied, otherwise generates a fresh one.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::Validation` if the title is missing or blank.
    pub fn create(props: CreateTaskProps, id: Option<TaskId>) -> Result<Self> {
        let title = guard::required_text(props.title, "title")?;

        Ok(Self {
            id: id.unwrap_or_default(),
            title,
            completed: false,
            deleted: false,
        })
    }

    /// Rebuild a task from stored state
    ///
    /// Runs the same checks as [`Task::create`], then applies the stored
    /// completion flag.
    pub fn restore(id: TaskId, title: String, completed: bool) -> Result<Self> {
        let mut task = Self::create(
            CreateTaskProps {
                title: Some(title),
            },
            Some(id),
        )?;
        task.completed = completed;
        Ok(task)
    }

    pub fn id(&self) -> &TaskId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub fn status(&self) -> TaskStatus {
        if self.completed {
            TaskStatus::Resolved
        } else {
            TaskStatus::Open
        }
    }

    /// Move the task from Open to Resolved
    ///
    /// # Errors
    ///
    /// - `TaskError::AlreadyCompleted` if the task is already resolved
    /// - `TaskError::DeletedTask` if the task has been deleted
    pub fn mark_as_resolved(&mut self) -> Result<()> {
        if self.completed {
            return Err(TaskError::AlreadyCompleted);
        }

        if self.deleted {
            return Err(TaskError::DeletedTask);
        }

        self.completed = true;
        Ok(())
    }

    /// Flag the task as deleted
    ///
    /// # Errors
    ///
    /// Returns `TaskError::AlreadyDeleted` on a second call.
    pub fn delete(&mut self) -> Result<()> {
        if self.deleted {
            return Err(TaskError::AlreadyDeleted);
        }

        self.deleted = true;
        Ok(())
    }
}
