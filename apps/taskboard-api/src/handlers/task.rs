//! Task handlers
//!
//! Each handler turns a request into one service call and the outcome into a
//! status code and body. No business rules live here.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use taskboard_domain::task::{ErrorKind, NewTask, TaskError, TaskId};
use tracing::{error, info, warn};

use crate::{
    dto::task::{CreateTaskRequest, TaskResponse},
    error::ApiError,
    AppState,
};

fn log_failure(operation: &str, err: &TaskError) {
    match err.kind() {
        ErrorKind::Storage | ErrorKind::Unexpected => {
            error!(operation, error = %err, "Task operation failed")
        }
        _ => warn!(operation, error = %err, "Task operation rejected"),
    }
}

/// A path id that can never name a stored task is reported as not found
fn parse_id(operation: &str, raw: String) -> Result<TaskId, ApiError> {
    if raw.trim().is_empty() {
        warn!(operation, id = %raw, "Blank task id in path");
        return Err(ApiError::task_not_found(&raw));
    }
    TaskId::parse(raw).map_err(|err| {
        log_failure(operation, &err);
        ApiError::from(err)
    })
}

/// Create a task
#[utoipa::path(
    post,
    path = "/tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created", body = TaskResponse),
        (status = 400, description = "Invalid body, blank title or duplicate id", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = FaultResponse)
    ),
    tag = "tasks"
)]
pub async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TaskResponse>), ApiError> {
    let Json(payload) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "Rejected task creation body");
        ApiError::from(rejection)
    })?;

    let request = NewTask {
        id: payload.id,
        title: payload.title,
    };

    match state.task_service.create_task(request).await {
        Ok(task) => {
            info!(task_id = %task.id, "Created task");
            Ok((StatusCode::CREATED, Json(task.into())))
        }
        Err(err) => {
            log_failure("create_task", &err);
            Err(err.into())
        }
    }
}

/// List every task
#[utoipa::path(
    get,
    path = "/tasks",
    responses(
        (status = 200, description = "All tasks, in storage order", body = [TaskResponse]),
        (status = 500, description = "Storage failure", body = FaultResponse)
    ),
    tag = "tasks"
)]
pub async fn list_tasks(
    State(state): State<AppState>,
) -> Result<Json<Vec<TaskResponse>>, ApiError> {
    let tasks = state.task_service.get_tasks().await.map_err(|err| {
        log_failure("list_tasks", &err);
        ApiError::from(err)
    })?;

    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

/// Fetch one task
#[utoipa::path(
    get,
    path = "/tasks/{id}",
    params(("id" = String, Path, description = "Task identifier")),
    responses(
        (status = 200, description = "Task found", body = TaskResponse),
        (status = 404, description = "No task with this id", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = FaultResponse)
    ),
    tag = "tasks"
)]
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TaskResponse>, ApiError> {
    let id = parse_id("get_task", id)?;

    let task = state.task_service.get_task_by_id(&id).await.map_err(|err| {
        log_failure("get_task", &err);
        ApiError::from(err)
    })?;

    Ok(Json(task.into()))
}

/// Delete a task, returning it as it was before deletion
#[utoipa::path(
    delete,
    path = "/tasks/{id}",
    params(("id" = String, Path, description = "Task identifier")),
    responses(
        (status = 200, description = "Task deleted", body = TaskResponse),
        (status = 404, description = "No task with this id", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = FaultResponse)
    ),
    tag = "tasks"
)]
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TaskResponse>, ApiError> {
    let id = parse_id("delete_task", id)?;

    match state.task_service.delete_task(&id).await {
        Ok(task) => {
            info!(task_id = %task.id, "Deleted task");
            Ok(Json(task.into()))
        }
        Err(err) => {
            log_failure("delete_task", &err);
            Err(err.into())
        }
    }
}

/// Mark a task as resolved
#[utoipa::path(
    patch,
    path = "/tasks/{id}/resolve",
    params(("id" = String, Path, description = "Task identifier")),
    responses(
        (status = 200, description = "Task resolved", body = TaskResponse),
        (status = 400, description = "Task already resolved", body = ErrorResponse),
        (status = 404, description = "No task with this id", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = FaultResponse)
    ),
    tag = "tasks"
)]
pub async fn resolve_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TaskResponse>, ApiError> {
    let id = parse_id("resolve_task", id)?;

    match state.task_service.mark_task_as_resolved(&id).await {
        Ok(task) => {
            info!(task_id = %task.id, "Resolved task");
            Ok(Json(task.into()))
        }
        Err(err) => {
            log_failure("resolve_task", &err);
            Err(err.into())
        }
    }
}
