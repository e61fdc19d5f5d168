//! # Taskboard Domain Layer
//!
//! This crate contains the pure business logic and domain models for Taskboard.
//! It follows hexagonal architecture principles:
//!
//! - **Entities**: The `Task` aggregate and its lifecycle rules
//! - **Ports**: Trait definitions for external dependencies (`TaskRepository`)
//! - **Services**: Use-case orchestration (`TaskService`)
//!
//! ## Architecture
//!
//! This layer has NO dependencies on infrastructure concerns (S3, HTTP, etc.).
//! Persistence is expressed as a trait (port) implemented by adapter crates.
//! The in-memory adapter lives here because it needs nothing but the standard library.
//!
//! ## Example
//!
//! ```rust
//! use taskboard_domain::storage::InMemoryTaskRepository;
//! use taskboard_domain::task::{NewTask, TaskService};
//!
//! # async fn example() -> taskboard_domain::task::Result<()> {
//! let service = TaskService::with_repository(InMemoryTaskRepository::new());
//! let created = service.create_task(NewTask::titled("Buy milk")).await?;
//! assert!(!created.completed);
//! # Ok(())
//! # }
//! ```

pub mod events;
pub mod storage;
pub mod task;

// Re-export commonly used types
pub use events::{EventBus, TaskEvent, TaskEventKind};
pub use storage::TaskRepository;
pub use task::{Task, TaskDto, TaskError, TaskId, TaskService};
