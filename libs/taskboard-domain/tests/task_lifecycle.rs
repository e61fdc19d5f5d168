//! Integration tests for the task lifecycle
//!
//! These tests drive the public API only:
//! 1. Create → resolve → delete through the service
//! 2. The Open → Resolved transition is one-way
//! 3. Concurrent creates with one id produce exactly one task
//! 4. Listing returns every task regardless of order

use std::collections::HashSet;
use std::sync::Arc;

use taskboard_domain::storage::InMemoryTaskRepository;
use taskboard_domain::task::{ErrorKind, NewTask, TaskError, TaskId, TaskService};
use taskboard_domain::TaskRepository;

fn id_of(dto: &taskboard_domain::TaskDto) -> TaskId {
    TaskId::parse(dto.id.clone()).expect("service returned a blank id")
}

#[tokio::test]
async fn test_full_lifecycle() {
    let service = TaskService::with_repository(InMemoryTaskRepository::new());

    let created = service
        .create_task(NewTask::titled("Buy milk"))
        .await
        .expect("create should succeed");
    assert_eq!(created.title, "Buy milk");
    assert!(!created.completed);

    let id = id_of(&created);
    let resolved = service.mark_task_as_resolved(&id).await.unwrap();
    assert!(resolved.completed);
    assert_eq!(resolved.id, created.id);

    let removed = service.delete_task(&id).await.unwrap();
    assert!(removed.completed, "snapshot is taken before removal");

    let err = service.get_task_by_id(&id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_resolved_never_returns_to_open() {
    let service = TaskService::with_repository(InMemoryTaskRepository::new());
    let id = id_of(&service.create_task(NewTask::titled("Ship it")).await.unwrap());

    service.mark_task_as_resolved(&id).await.unwrap();

    for _ in 0..3 {
        let err = service.mark_task_as_resolved(&id).await.unwrap_err();
        assert_eq!(err, TaskError::AlreadyCompleted);
        assert!(service.get_task_by_id(&id).await.unwrap().completed);
    }
}

#[tokio::test]
async fn test_listing_contains_every_task() {
    let service = TaskService::with_repository(InMemoryTaskRepository::new());
    let a = service.create_task(NewTask::titled("first")).await.unwrap();
    let b = service.create_task(NewTask::titled("second")).await.unwrap();

    let listed: HashSet<String> = service
        .get_tasks()
        .await
        .unwrap()
        .into_iter()
        .map(|dto| dto.id)
        .collect();

    assert_eq!(listed, HashSet::from([a.id, b.id]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_with_same_id_store_one_task() {
    let repository = InMemoryTaskRepository::new();
    let service = Arc::new(TaskService::with_repository(repository.clone()));

    let mut handles = Vec::new();
    for n in 0..8 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            service
                .create_task(NewTask {
                    id: Some("contended".into()),
                    title: Some(format!("attempt {n}")),
                })
                .await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(err) => assert!(matches!(err, TaskError::DuplicateId(_))),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(repository.len(), 1);
    let stored = repository
        .find_by_id(&TaskId::parse("contended").unwrap())
        .await
        .unwrap();
    assert!(stored.is_some());
}
