//! Mapping of failures to HTTP responses

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use taskboard_domain::task::{ErrorKind, TaskError};

use crate::dto::task::{ErrorResponse, FaultMessage, FaultResponse};

/// A failed request, ready to be rendered
///
/// Expected failures render as `{"error": ...}`, faults as
/// `{"errors": {"message": ...}}`.
#[derive(Debug)]
pub enum ApiError {
    Expected { status: StatusCode, message: String },
    Fault { status: StatusCode, message: String },
}

impl ApiError {
    pub fn not_found_route() -> Self {
        Self::Fault {
            status: StatusCode::NOT_FOUND,
            message: "Not Found".to_string(),
        }
    }

    /// 404 for an id that is not a valid [`TaskId`]
    pub fn task_not_found(raw_id: &str) -> Self {
        Self::Expected {
            status: StatusCode::NOT_FOUND,
            message: format!("Task {} not found", raw_id),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Expected { status, .. } | Self::Fault { status, .. } => *status,
        }
    }
}

impl From<TaskError> for ApiError {
    fn from(err: TaskError) -> Self {
        let message = err.to_string();
        match err.kind() {
            ErrorKind::Validation | ErrorKind::Conflict => Self::Expected {
                status: StatusCode::BAD_REQUEST,
                message,
            },
            ErrorKind::NotFound => Self::Expected {
                status: StatusCode::NOT_FOUND,
                message,
            },
            ErrorKind::Storage | ErrorKind::Unexpected => Self::Fault {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message,
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Expected {
            status: StatusCode::BAD_REQUEST,
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::Expected { message, .. } => {
                (status, Json(ErrorResponse { error: message })).into_response()
            }
            Self::Fault { message, .. } => (
                status,
                Json(FaultResponse {
                    errors: FaultMessage { message },
                }),
            )
                .into_response(),
        }
    }
}
