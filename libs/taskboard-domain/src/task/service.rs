//! Task service - Use case orchestration
//!
//! Each use case loads what it needs from the repository, applies one domain
//! operation, persists, and answers with a `TaskDto`. Expected failures come
//! back as `Err` values; nothing here panics.

use std::sync::Arc;

use super::{
    entity::{CreateTaskProps, Task},
    error::{Result, TaskError},
    ids::TaskId,
    mapper::{TaskDto, TaskMapper},
};
use crate::events::{EventBus, TaskEvent, TaskEventKind};
use crate::storage::TaskRepository;

/// Input for [`TaskService::create_task`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    /// Client-chosen id; generated when absent
    pub id: Option<String>,
    pub title: Option<String>,
}

impl NewTask {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: Some(title.into()),
        }
    }
}

/// Service running the task use cases
///
/// ## Static Dispatch
///
/// The service is generic over any `TaskRepository` implementation, so each
/// adapter gets its own monomorphized copy.
pub struct TaskService<R> {
    repository: R,
    events: Arc<EventBus>,
}

impl<R> TaskService<R>
where
    R: TaskRepository,
{
    /// Create a service publishing to the given event bus
    pub fn new(repository: R, events: Arc<EventBus>) -> Self {
        Self { repository, events }
    }

    /// Create a service with an event bus nobody listens to
    pub fn with_repository(repository: R) -> Self {
        Self::new(repository, Arc::new(EventBus::new()))
    }

    /// Create a task
    ///
    /// A supplied id is checked for duplicates first; the insert itself is
    /// create-only, so a racing create with the same id still fails.
    ///
    /// # Errors
    ///
    /// - `TaskError::DuplicateId` if the id is taken
    /// - `TaskError::Validation` if the id or title is blank, or the title is missing
    /// - `TaskError::StorageFailure` if storage fails
    pub async fn create_task(&self, request: NewTask) -> Result<TaskDto> {
        let id = match request.id {
            Some(raw) => {
                let id = TaskId::parse(raw)?;
                if self.repository.find_by_id(&id).await?.is_some() {
                    return Err(TaskError::DuplicateId(id));
                }
                Some(id)
            }
            None => None,
        };

        let task = Task::create(
            CreateTaskProps {
                title: request.title,
            },
            id,
        )?;

        let stored = self.repository.insert(&task).await?;
        self.publish(TaskEventKind::Created, stored.id());

        Ok(TaskMapper::to_dto(&stored))
    }

    /// All stored tasks
    pub async fn get_tasks(&self) -> Result<Vec<TaskDto>> {
        let tasks = self.repository.find_all().await?;
        Ok(tasks.iter().map(TaskMapper::to_dto).collect())
    }

    /// One task by id
    ///
    /// # Errors
    ///
    /// Returns `TaskError::NotFound` if no task has this id
    pub async fn get_task_by_id(&self, id: &TaskId) -> Result<TaskDto> {
        let task = self.load(id).await?;
        Ok(TaskMapper::to_dto(&task))
    }

    /// Remove a task, answering with how it looked before removal
    ///
    /// # Errors
    ///
    /// Returns `TaskError::NotFound` if no task has this id
    pub async fn delete_task(&self, id: &TaskId) -> Result<TaskDto> {
        let mut task = self.load(id).await?;
        let snapshot = TaskMapper::to_dto(&task);

        task.delete()?;
        self.repository.delete(task.id()).await?;
        self.publish(TaskEventKind::Deleted, task.id());

        Ok(snapshot)
    }

    /// Resolve an open task
    ///
    /// # Errors
    ///
    /// - `TaskError::NotFound` if no task has this id
    /// - `TaskError::AlreadyCompleted` if it is already resolved
    /// - `TaskError::DeletedTask` if it has been deleted
    pub async fn mark_task_as_resolved(&self, id: &TaskId) -> Result<TaskDto> {
        let mut task = self.load(id).await?;

        task.mark_as_resolved()?;
        let saved = self.repository.save(&task).await?;
        self.publish(TaskEventKind::Resolved, saved.id());

        Ok(TaskMapper::to_dto(&saved))
    }

    async fn load(&self, id: &TaskId) -> Result<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| TaskError::NotFound(id.clone()))
    }

    fn publish(&self, kind: TaskEventKind, id: &TaskId) {
        self.events.publish(&TaskEvent::now(kind, id.clone()));
    }
}
