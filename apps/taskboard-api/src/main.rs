//! Taskboard API
//!
//! HTTP service for managing tasks. Wiring happens once, in order:
//! repository → service → router.

mod backend;
mod config;
mod dto;
mod error;
mod handlers;
mod routes;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use anyhow::{Context, Result};
use taskboard_domain::{storage::InMemoryTaskRepository, EventBus, TaskEvent, TaskService};
use taskboard_s3::S3TaskRepository;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::{
    backend::TaskStore,
    config::{AppConfig, LogFormat, StorageBackend, StorageConfig},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub task_service: Arc<TaskService<TaskStore>>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("Failed to load configuration")?;

    init_tracing(&config)?;

    info!("Starting Taskboard API");

    let store = connect_store(&config.storage).await?;
    info!(backend = store.name(), "Task storage ready");

    let mut events = EventBus::new();
    events.subscribe(log_task_event);

    let service = TaskService::new(store, Arc::new(events));

    // Create shared application state
    let state = AppState {
        task_service: Arc::new(service),
    };

    // Build HTTP router
    let app = routes::create_router(state, &config.api_prefix);

    let addr = config.bind_address();
    info!(addr = %addr, api_prefix = %config.api_prefix, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Taskboard API stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.log_level)
        .with_context(|| format!("Invalid LOG_LEVEL '{}'", config.log_level))?;

    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    Ok(())
}

async fn connect_store(storage: &StorageConfig) -> Result<TaskStore> {
    match storage.backend {
        StorageBackend::Memory => {
            warn!("Using in-memory task storage, tasks are lost on restart");
            Ok(TaskStore::Memory(InMemoryTaskRepository::new()))
        }
        StorageBackend::S3 => {
            let aws_config =
                aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;

            // Path-style addressing keeps MinIO and other S3-compatible stores working
            let mut s3_config = aws_sdk_s3::config::Builder::from(&aws_config).force_path_style(true);
            if let Some(url) = &storage.url {
                info!(url = %url, "Using custom storage endpoint");
                s3_config = s3_config.endpoint_url(url);
            }
            let client = aws_sdk_s3::Client::from_conf(s3_config.build());

            info!(
                bucket = %storage.bucket,
                collection = %storage.collection,
                retries = storage.connect.retries,
                "Connecting to S3 task storage"
            );

            let repository = S3TaskRepository::connect(
                client,
                storage.bucket.clone(),
                storage.collection.clone(),
                storage.connect,
            )
            .await
            .context("Failed to connect to task storage")?;

            Ok(TaskStore::S3(repository))
        }
    }
}

fn log_task_event(event: &TaskEvent) {
    info!(
        event = %event.kind,
        task_id = %event.task_id,
        occurred_at = %event.occurred_at,
        "Task event"
    );
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
