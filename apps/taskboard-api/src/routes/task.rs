//! Task routes

use axum::{
    routing::{get, patch},
    Router,
};

use crate::{
    handlers::task::{create_task, delete_task, get_task, list_tasks, resolve_task},
    AppState,
};

/// Create task routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/:id", get(get_task).delete(delete_task))
        .route("/tasks/:id/resolve", patch(resolve_task))
}
