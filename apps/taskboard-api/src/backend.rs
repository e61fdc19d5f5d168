//! Storage backend chosen at startup

use std::future::Future;

use taskboard_domain::{
    storage::{InMemoryTaskRepository, TaskRepository},
    task::{Result, Task, TaskId},
};
use taskboard_s3::S3TaskRepository;

/// The repository the service runs on, picked from configuration
#[derive(Clone)]
pub enum TaskStore {
    S3(S3TaskRepository),
    Memory(InMemoryTaskRepository),
}

impl TaskStore {
    pub fn name(&self) -> &'static str {
        match self {
            Self::S3(_) => "s3",
            Self::Memory(_) => "memory",
        }
    }
}

impl TaskRepository for TaskStore {
    fn insert(&self, task: &Task) -> impl Future<Output = Result<Task>> + Send {
        async move {
            match self {
                Self::S3(repo) => repo.insert(task).await,
                Self::Memory(repo) => repo.insert(task).await,
            }
        }
    }

    fn save(&self, task: &Task) -> impl Future<Output = Result<Task>> + Send {
        async move {
            match self {
                Self::S3(repo) => repo.save(task).await,
                Self::Memory(repo) => repo.save(task).await,
            }
        }
    }

    fn find_by_id(&self, id: &TaskId) -> impl Future<Output = Result<Option<Task>>> + Send {
        async move {
            match self {
                Self::S3(repo) => repo.find_by_id(id).await,
                Self::Memory(repo) => repo.find_by_id(id).await,
            }
        }
    }

    fn find_all(&self) -> impl Future<Output = Result<Vec<Task>>> + Send {
        async move {
            match self {
                Self::S3(repo) => repo.find_all().await,
                Self::Memory(repo) => repo.find_all().await,
            }
        }
    }

    fn delete(&self, id: &TaskId) -> impl Future<Output = Result<()>> + Send {
        async move {
            match self {
                Self::S3(repo) => repo.delete(id).await,
                Self::Memory(repo) => repo.delete(id).await,
            }
        }
    }
}
