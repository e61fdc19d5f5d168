//! Process configuration read from the environment

use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use taskboard_s3::ConnectOptions;

/// Where tasks are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// S3-compatible bucket (MinIO, AWS)
    S3,
    /// Process memory; lost on restart
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "s3" => Ok(Self::S3),
            "memory" => Ok(Self::Memory),
            other => bail!("unknown storage backend '{other}', expected 's3' or 'memory'"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => bail!("unknown log format '{other}', expected 'text' or 'json'"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub bucket: String,
    pub collection: String,
    /// Endpoint override, e.g. `http://localhost:9000` for MinIO
    pub url: Option<String>,
    pub connect: ConnectOptions,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub api_prefix: String,
    pub log_level: String,
    pub log_format: LogFormat,
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Read the configuration from process environment variables
    ///
    /// Call `dotenvy::dotenv()` first so a `.env` file is taken into account.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = parse_or(var("PORT"), "PORT", 5000)?;
        let retries = parse_or(var("STORAGE_CONNECTION_RETRIES"), "STORAGE_CONNECTION_RETRIES", 5)?;
        let timeout_ms = parse_or(
            var("STORAGE_CONNECTION_TIMEOUT_MS"),
            "STORAGE_CONNECTION_TIMEOUT_MS",
            10_000,
        )?;

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            api_prefix: normalize_prefix(&var("API_PREFIX").unwrap_or_else(|| "/api".to_string())),
            log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            log_format: parse_or(var("LOG_FORMAT"), "LOG_FORMAT", LogFormat::Text)?,
            storage: StorageConfig {
                backend: parse_or(var("STORAGE_BACKEND"), "STORAGE_BACKEND", StorageBackend::S3)?,
                bucket: var("TASKS_BUCKET").unwrap_or_else(|| "tasks".to_string()),
                collection: var("TASKS_COLLECTION").unwrap_or_else(|| "tasks".to_string()),
                url: var("STORAGE_URL"),
                connect: ConnectOptions {
                    retries,
                    timeout: Duration::from_millis(timeout_ms),
                },
            },
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|err| anyhow::anyhow!("{err}"))
            .with_context(|| format!("invalid value for {key}: '{raw}'")),
        None => Ok(default),
    }
}

/// `""` and `"/"` mean no prefix; anything else gets one leading slash and no trailing one
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
