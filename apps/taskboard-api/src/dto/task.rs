//! DTOs for task endpoints

use serde::{Deserialize, Serialize};
use taskboard_domain::TaskDto;
use utoipa::ToSchema;

/// Request body for task creation
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTaskRequest {
    /// Task title; must contain a non-whitespace character
    #[schema(example = "Buy milk", min_length = 1)]
    pub title: Option<String>,
    /// Optional client-chosen identifier; generated when omitted
    #[schema(example = "0190f1c2-7d3e-7a45-9c1b-2f4e5d6a7b8c")]
    pub id: Option<String>,
}

/// A task as seen by API clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TaskResponse {
    #[schema(example = "0190f1c2-7d3e-7a45-9c1b-2f4e5d6a7b8c")]
    pub id: String,
    #[schema(example = "Buy milk")]
    pub title: String,
    #[schema(example = false)]
    pub completed: bool,
}

impl From<TaskDto> for TaskResponse {
    fn from(dto: TaskDto) -> Self {
        Self {
            id: dto.id,
            title: dto.title,
            completed: dto.completed,
        }
    }
}

/// Error body for expected failures (validation, conflicts, missing tasks)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Task already completed")]
    pub error: String,
}

/// Error body for faults nobody anticipated
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FaultResponse {
    pub errors: FaultMessage,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FaultMessage {
    #[schema(example = "Storage operation failed: connection reset")]
    pub message: String,
}
