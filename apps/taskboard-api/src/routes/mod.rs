//! API routes

pub mod task;

use std::time::Instant;

use axum::{
    extract::Request,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use utoipa::{openapi::server::Server, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    dto::task::{CreateTaskRequest, ErrorResponse, FaultMessage, FaultResponse, TaskResponse},
    error::ApiError,
    handlers, AppState,
};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::task::create_task,
        handlers::task::list_tasks,
        handlers::task::get_task,
        handlers::task::delete_task,
        handlers::task::resolve_task
    ),
    components(
        schemas(CreateTaskRequest, TaskResponse, ErrorResponse, FaultResponse, FaultMessage)
    ),
    tags(
        (name = "tasks", description = "Task management endpoints")
    ),
    info(
        title = "Taskboard API",
        version = "0.1.0",
        description = "Create, list, resolve and delete tasks",
        contact(
            name = "Taskboard Team"
        )
    )
)]
pub struct ApiDoc;

/// OpenAPI document with the API prefix as its server URL
pub fn openapi(api_prefix: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    if !api_prefix.is_empty() {
        doc.servers = Some(vec![Server::new(api_prefix)]);
    }
    doc
}

/// Create the main application router
///
/// Task routes are nested under `api_prefix` (already normalized, `""` for none).
/// Unknown paths and unsupported methods on known paths both answer the JSON 404.
pub fn create_router(state: AppState, api_prefix: &str) -> Router {
    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi(api_prefix)));

    let router = if api_prefix.is_empty() {
        router.merge(task::routes())
    } else {
        router.nest(api_prefix, task::routes())
    };

    router
        .route("/status", get(status_handler))
        .method_not_allowed_fallback(fallback_handler)
        .fallback(fallback_handler)
        .layer(cors())
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

/// Any origin may call the API, including the browser frontend
fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Liveness probe; answers GET and HEAD with an empty 200
async fn status_handler() {}

async fn fallback_handler() -> impl IntoResponse {
    ApiError::not_found_route()
}

async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;

    info!(
        method = %method,
        uri = %uri,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Handled request"
    );
    response
}
