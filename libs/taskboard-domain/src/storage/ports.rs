//! Ports (trait definitions) for persistence
//!
//! The domain defines what it needs from storage; adapters provide it.
//!
//! ## Static Dispatch
//!
//! We use native Rust async traits with `impl Future` return types instead of
//! `async_trait` to ensure zero-cost abstractions and static dispatch.

use std::future::Future;

use crate::task::{Result, Task, TaskId};

/// Port for task persistence
///
/// Implementations work on whole task documents and must:
/// - Convert stored records through `TaskMapper` in both directions
/// - Convert infrastructure errors to `TaskError::StorageFailure` with the cause text
///
/// No transactions: a failed call may or may not have reached the store.
pub trait TaskRepository: Send + Sync {
    /// Write a task that must not exist yet
    ///
    /// This is the uniqueness constraint for task ids: when two creates race
    /// with the same id, exactly one write succeeds.
    ///
    /// # Errors
    ///
    /// - `TaskError::DuplicateId` if a record with this id is already stored
    /// - `TaskError::StorageFailure` if the storage operation fails
    fn insert(&self, task: &Task) -> impl Future<Output = Result<Task>> + Send;

    /// Upsert a task by id
    ///
    /// Updates the stored record if one exists, inserts it otherwise. Returns
    /// the task rebuilt from the data just written.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::StorageFailure` if the storage operation fails
    fn save(&self, task: &Task) -> impl Future<Output = Result<Task>> + Send;

    /// Look a task up by id
    ///
    /// Returns `None` (not an error) when no record matches.
    fn find_by_id(&self, id: &TaskId) -> impl Future<Output = Result<Option<Task>>> + Send;

    /// Every stored task, in whatever order the store yields them
    fn find_all(&self) -> impl Future<Output = Result<Vec<Task>>> + Send;

    /// Remove the stored record
    ///
    /// Removing an id that is not stored is not an error.
    fn delete(&self, id: &TaskId) -> impl Future<Output = Result<()>> + Send;
}
