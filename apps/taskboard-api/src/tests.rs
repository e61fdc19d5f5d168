//! Router tests against the in-memory backend

use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use taskboard_domain::{storage::InMemoryTaskRepository, TaskService};
use tower::ServiceExt;

use crate::{backend::TaskStore, dto::task::TaskResponse, routes, AppState};

fn app() -> Router {
    let service = TaskService::with_repository(TaskStore::Memory(InMemoryTaskRepository::new()));
    let state = AppState {
        task_service: Arc::new(service),
    };
    routes::create_router(state, "/api")
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create(app: &Router, title: &str) -> TaskResponse {
    let body = json!({ "title": title }).to_string();
    let (status, value) = send(app, Method::POST, "/api/tasks", Some(body.as_str())).await;
    assert_eq!(status, StatusCode::CREATED);
    serde_json::from_value(value).unwrap()
}

#[tokio::test]
async fn test_create_task_returns_201() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/api/tasks", Some(r#"{"title":"Buy milk"}"#)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["title"], "Buy milk");
    assert_eq!(body["completed"], false);
    assert!(!body["id"].as_str().unwrap().is_empty());
    assert_eq!(body.as_object().unwrap().len(), 3);
}

#[tokio::test]
async fn test_create_task_rejects_bad_bodies() {
    let app = app();

    for body in [r#"{"title":"   "}"#, r#"{"title":""}"#, r#"{}"#, r#"{"title":42}"#, "{not json"] {
        let (status, value) = send(&app, Method::POST, "/api/tasks", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
        assert!(value["error"].is_string(), "body {body}");
    }
}

#[tokio::test]
async fn test_create_task_with_duplicate_id_is_400() {
    let app = app();
    let body = r#"{"id":"fixed","title":"first"}"#;

    let (status, _) = send(&app, Method::POST, "/api/tasks", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, value) = send(&app, Method::POST, "/api/tasks", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["error"], "Task with id fixed already exists");
}

#[tokio::test]
async fn test_list_contains_both_tasks() {
    let app = app();
    let a = create(&app, "first").await;
    let b = create(&app, "second").await;

    let (status, body) = send(&app, Method::GET, "/api/tasks", None).await;

    assert_eq!(status, StatusCode::OK);
    let ids: HashSet<String> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|task| task["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, HashSet::from([a.id, b.id]));
}

#[tokio::test]
async fn test_get_task_by_id() {
    let app = app();
    let created = create(&app, "Buy milk").await;

    let (status, body) = send(&app, Method::GET, &format!("/api/tasks/{}", created.id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_value::<TaskResponse>(body).unwrap(), created);

    let (status, body) = send(&app, Method::GET, "/api/tasks/unknown", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Task unknown not found");
}

#[tokio::test]
async fn test_resolve_twice() {
    let app = app();
    let created = create(&app, "Buy milk").await;
    let uri = format!("/api/tasks/{}/resolve", created.id);

    let (status, body) = send(&app, Method::PATCH, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["completed"], true);

    let (status, body) = send(&app, Method::PATCH, &uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Task already completed");

    let (status, _) = send(&app, Method::PATCH, "/api/tasks/unknown/resolve", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_task() {
    let app = app();
    let created = create(&app, "Buy milk").await;
    let uri = format!("/api/tasks/{}", created.id);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_value::<TaskResponse>(body).unwrap(), created);

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_unknown_is_404() {
    let app = app();

    let (status, body) = send(&app, Method::DELETE, "/api/tasks/does-not-exist", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_status_endpoint() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, Method::HEAD, "/status", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/tasks", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "errors": { "message": "Not Found" } }));
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/tasks/{id}/resolve"].is_object());
    assert_eq!(body["servers"][0]["url"], "/api");
}

#[tokio::test]
async fn test_unsupported_method_is_json_404() {
    let app = app();

    let (status, body) = send(&app, Method::PUT, "/api/tasks/abc", Some(r#"{"title":"x"}"#)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "errors": { "message": "Not Found" } }));

    let (status, body) = send(&app, Method::POST, "/status", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "errors": { "message": "Not Found" } }));
}

#[tokio::test]
async fn test_blank_path_id_is_404() {
    let app = app();
    create(&app, "Buy milk").await;

    for (method, uri) in [
        (Method::GET, "/api/tasks/%20"),
        (Method::DELETE, "/api/tasks/%20"),
        (Method::PATCH, "/api/tasks/%20/resolve"),
    ] {
        let (status, body) = send(&app, method.clone(), uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
        assert_eq!(body["error"], "Task   not found", "{method} {uri}");
    }
}

#[tokio::test]
async fn test_cors_headers() {
    let app = app();

    let preflight = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/tasks")
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(preflight).await.unwrap();
    assert!(response.status().is_success());
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    assert!(response.headers().contains_key("access-control-allow-methods"));

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/tasks")
        .header("origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}
