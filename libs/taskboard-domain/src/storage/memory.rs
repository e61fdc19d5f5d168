//! In-memory task repository
//!
//! Keeps `TaskRecord` documents in a map, so it goes through the same mapper
//! path as a real document store. Used for local runs and tests.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, RwLock};

use super::TaskRepository;
use crate::task::{Result, Task, TaskError, TaskId, TaskMapper, TaskRecord};

/// Thread-safe in-memory task repository
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    records: Arc<RwLock<HashMap<String, TaskRecord>>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    ///
    /// Counts through a poisoned lock: every write completes its insert or
    /// remove before releasing the guard, so the map is never half-updated.
    pub fn len(&self) -> usize {
        match self.records.read() {
            Ok(records) => records.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock_poisoned(err: impl std::fmt::Display) -> TaskError {
    TaskError::storage_failure(format!("in-memory store lock poisoned: {err}"))
}

impl TaskRepository for InMemoryTaskRepository {
    fn insert(&self, task: &Task) -> impl Future<Output = Result<Task>> + Send {
        let record = TaskMapper::to_persistence(task);
        let id = task.id().clone();
        let records = self.records.clone();

        async move {
            let mut records = records.write().map_err(lock_poisoned)?;
            if records.contains_key(&record.id) {
                return Err(TaskError::DuplicateId(id));
            }
            records.insert(record.id.clone(), record.clone());
            TaskMapper::to_domain(record)
        }
    }

    fn save(&self, task: &Task) -> impl Future<Output = Result<Task>> + Send {
        let record = TaskMapper::to_persistence(task);
        let records = self.records.clone();

        async move {
            records
                .write()
                .map_err(lock_poisoned)?
                .insert(record.id.clone(), record.clone());
            TaskMapper::to_domain(record)
        }
    }

    fn find_by_id(&self, id: &TaskId) -> impl Future<Output = Result<Option<Task>>> + Send {
        let key = id.to_string();
        let records = self.records.clone();

        async move {
            let record = records.read().map_err(lock_poisoned)?.get(&key).cloned();
            record.map(TaskMapper::to_domain).transpose()
        }
    }

    fn find_all(&self) -> impl Future<Output = Result<Vec<Task>>> + Send {
        let records = self.records.clone();

        async move {
            let snapshot: Vec<TaskRecord> =
                records.read().map_err(lock_poisoned)?.values().cloned().collect();
            snapshot.into_iter().map(TaskMapper::to_domain).collect()
        }
    }

    fn delete(&self, id: &TaskId) -> impl Future<Output = Result<()>> + Send {
        let key = id.to_string();
        let records = self.records.clone();

        async move {
            records.write().map_err(lock_poisoned)?.remove(&key);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::CreateTaskProps;

    fn task(title: &str) -> Task {
        Task::create(CreateTaskProps::titled(title), None).unwrap()
    }

    #[tokio::test]
    async fn test_insert_then_find() {
        let repo = InMemoryTaskRepository::new();
        let task = task("Buy milk");

        repo.insert(&task).await.unwrap();

        let found = repo.find_by_id(task.id()).await.unwrap().unwrap();
        assert_eq!(found, task);
    }

    #[tokio::test]
    async fn test_insert_enforces_unique_ids() {
        let repo = InMemoryTaskRepository::new();
        let id = TaskId::parse("same").unwrap();
        let first = Task::create(CreateTaskProps::titled("first"), Some(id.clone())).unwrap();
        let second = Task::create(CreateTaskProps::titled("second"), Some(id.clone())).unwrap();

        repo.insert(&first).await.unwrap();
        let err = repo.insert(&second).await.unwrap_err();

        assert_eq!(err, TaskError::DuplicateId(id.clone()));
        let stored = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.title(), "first");
    }

    #[tokio::test]
    async fn test_save_upserts() {
        let repo = InMemoryTaskRepository::new();
        let mut task = task("Buy milk");

        repo.save(&task).await.unwrap();
        task.mark_as_resolved().unwrap();
        let saved = repo.save(&task).await.unwrap();

        assert!(saved.is_completed());
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_find_missing_is_none() {
        let repo = InMemoryTaskRepository::new();
        let missing = TaskId::parse("nope").unwrap();

        assert!(repo.find_by_id(&missing).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = InMemoryTaskRepository::new();
        let task = task("Buy milk");
        repo.insert(&task).await.unwrap();

        repo.delete(task.id()).await.unwrap();
        repo.delete(task.id()).await.unwrap();

        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_find_all_returns_every_task() {
        let repo = InMemoryTaskRepository::new();
        let a = task("a");
        let b = task("b");
        repo.insert(&a).await.unwrap();
        repo.insert(&b).await.unwrap();

        let mut ids: Vec<_> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.id().clone())
            .collect();
        ids.sort();
        let mut expected = vec![a.id().clone(), b.id().clone()];
        expected.sort();

        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn test_poisoned_lock() {
        let repo = InMemoryTaskRepository::new();
        repo.insert(&task("before")).await.unwrap();

        let records = repo.records.clone();
        std::thread::spawn(move || {
            let _guard = records.write().unwrap();
            panic!("writer died holding the lock");
        })
        .join()
        .unwrap_err();

        assert_eq!(repo.len(), 1);
        let err = repo.insert(&task("after")).await.unwrap_err();
        assert!(matches!(err, TaskError::StorageFailure(_)));
        assert!(repo.find_all().await.is_err());
    }
}
