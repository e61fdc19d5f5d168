//! Conversions between the persisted record, the Task aggregate and the DTO

use serde::{Deserialize, Serialize};

use super::{
    entity::Task,
    error::{Result, TaskError},
    ids::TaskId,
};

/// Document stored for each task in the "tasks" collection
///
/// The in-memory `deleted` flag is not part of the stored layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: String,
    pub title: String,
    pub completed: bool,
}

/// Flat transfer shape exposed at the API boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDto {
    pub id: String,
    pub title: String,
    pub completed: bool,
}

/// Stateless mapper between the three task representations
pub struct TaskMapper;

impl TaskMapper {
    /// Rebuild a Task from a stored record
    ///
    /// Stored data was validated when written, so a failure here means the
    /// record is corrupt.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::CorruptRecord` if the record no longer satisfies the
    /// Task invariants.
    pub fn to_domain(record: TaskRecord) -> Result<Task> {
        let record_id = record.id.clone();
        TaskId::parse(record.id)
            .and_then(|id| Task::restore(id, record.title, record.completed))
            .map_err(|err| TaskError::corrupt_record(format!("record '{record_id}': {err}")))
    }

    pub fn to_dto(task: &Task) -> TaskDto {
        TaskDto {
            id: task.id().to_string(),
            title: task.title().to_string(),
            completed: task.is_completed(),
        }
    }

    pub fn to_persistence(task: &Task) -> TaskRecord {
        TaskRecord {
            id: task.id().to_string(),
            title: task.title().to_string(),
            completed: task.is_completed(),
        }
    }
}
