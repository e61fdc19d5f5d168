//! S3 Task Repository Implementation
//!
//! This module implements the `TaskRepository` trait using an S3 bucket as a
//! document store. It handles all S3 operations and converts AWS errors to
//! domain errors.

use std::time::Duration;

use aws_sdk_s3::{
    error::{DisplayErrorContext, ProvideErrorMetadata},
    primitives::ByteStream,
    Client,
};
use bytes::Bytes;
use taskboard_domain::{
    storage::TaskRepository,
    task::{Result, Task, TaskError, TaskId, TaskMapper, TaskRecord},
};
use tracing::{debug, error, info, instrument, warn, Instrument, Span};

const DOCUMENT_EXTENSION: &str = ".json";
const CONTENT_TYPE: &str = "application/json";

/// Startup connection settings
#[derive(Debug, Clone, Copy)]
pub struct ConnectOptions {
    /// Extra attempts after the first one fails
    pub retries: u32,
    /// Limit for each attempt
    pub timeout: Duration,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            retries: 5,
            timeout: Duration::from_millis(10_000),
        }
    }
}

/// S3-based implementation of the TaskRepository port
///
/// Every task is stored as a standalone JSON document in a flat "collection"
/// prefix. Creates use a conditional put (`If-None-Match: *`), so the bucket
/// itself enforces id uniqueness.
///
/// ## Error Handling
///
/// All AWS SDK errors are converted to `TaskError::StorageFailure` with the
/// full error context for debugging. Undecodable documents become
/// `TaskError::CorruptRecord`.
#[derive(Clone)]
pub struct S3TaskRepository {
    client: Client,
    bucket: String,
    collection: String,
}

impl S3TaskRepository {
    /// Create a new S3 task repository without probing the bucket
    ///
    /// # Arguments
    ///
    /// * `client` - Configured AWS S3 client
    /// * `bucket` - Name of the S3 bucket to use
    /// * `collection` - Key prefix holding the task documents (e.g. "tasks")
    pub fn new(client: Client, bucket: String, collection: String) -> Self {
        let collection = normalize_collection(&collection);
        info!(bucket = %bucket, collection = %collection, "Initializing S3TaskRepository");
        Self {
            client,
            bucket,
            collection,
        }
    }

    /// Create the repository once the bucket answers
    ///
    /// Probes the bucket with `head_bucket`. Each attempt is bounded by
    /// `options.timeout`; after a failure the probe is retried immediately, up
    /// to `options.retries` more times.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use aws_sdk_s3::Client;
    /// use taskboard_s3::{ConnectOptions, S3TaskRepository};
    ///
    /// # async fn example() -> taskboard_domain::task::Result<()> {
    /// let config = aws_config::load_from_env().await;
    /// let repo = S3TaskRepository::connect(
    ///     Client::new(&config),
    ///     "taskboard".to_string(),
    ///     "tasks".to_string(),
    ///     ConnectOptions::default(),
    /// )
    /// .await?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `TaskError::StorageFailure` when every attempt fails
    pub async fn connect(
        client: Client,
        bucket: String,
        collection: String,
        options: ConnectOptions,
    ) -> Result<Self> {
        let attempts = options.retries.saturating_add(1);
        let mut last_error = String::new();

        for attempt in 1..=attempts {
            debug!(bucket = %bucket, attempt, "Probing S3 bucket");

            match tokio::time::timeout(
                options.timeout,
                client.head_bucket().bucket(&bucket).send(),
            )
            .await
            {
                Ok(Ok(_)) => {
                    info!(bucket = %bucket, attempt, "Connected to S3 bucket");
                    return Ok(Self::new(client, bucket, collection));
                }
                Ok(Err(err)) => {
                    last_error = DisplayErrorContext(&err).to_string();
                }
                Err(_) => {
                    last_error = format!("timed out after {}ms", options.timeout.as_millis());
                }
            }

            warn!(
                bucket = %bucket,
                attempt,
                retries_left = attempts - attempt,
                error = %last_error,
                "S3 connection failed, retrying"
            );
        }

        error!(bucket = %bucket, attempts, "Could not connect to S3 after multiple attempts");
        Err(TaskError::storage_failure(format!(
            "could not reach bucket '{}' after {} attempts: {}",
            bucket, attempts, last_error
        )))
    }

    /// S3 key of a task document: `<collection>/<id>.json`
    fn document_key(collection: &str, id: &str) -> String {
        format!("{}/{}{}", collection, id, DOCUMENT_EXTENSION)
    }

    fn collection_prefix(collection: &str) -> String {
        format!("{}/", collection)
    }
}

fn normalize_collection(collection: &str) -> String {
    collection.trim_matches('/').to_string()
}

fn encode_record(record: &TaskRecord) -> Result<Bytes> {
    serde_json::to_vec(record)
        .map(Bytes::from)
        .map_err(|err| {
            TaskError::unexpected(format!("failed to encode task '{}': {}", record.id, err))
        })
}

fn decode_record(key: &str, data: &[u8]) -> Result<TaskRecord> {
    serde_json::from_slice(data)
        .map_err(|err| TaskError::corrupt_record(format!("document '{}': {}", key, err)))
}

/// Read one document; `None` when the key does not exist
async fn fetch_record(client: &Client, bucket: &str, key: &str) -> Result<Option<TaskRecord>> {
    debug!(key = %key, bucket = %bucket, "Retrieving task document from S3");

    let output = match client.get_object().bucket(bucket).key(key).send().await {
        Ok(output) => output,
        Err(err) => {
            if err
                .as_service_error()
                .map(|service_err| service_err.is_no_such_key())
                .unwrap_or(false)
            {
                debug!(key = %key, "Task document does not exist in S3");
                return Ok(None);
            }
            warn!(key = %key, error = %DisplayErrorContext(&err), "Failed to retrieve task document from S3");
            return Err(TaskError::storage_failure(format!(
                "S3 get_object failed for key '{}': {}",
                key,
                DisplayErrorContext(&err)
            )));
        }
    };

    let data = output.body.collect().await.map_err(|err| {
        error!(key = %key, error = ?err, "Failed to read S3 object body");
        TaskError::storage_failure(format!(
            "Failed to read S3 object body for key '{}': {}",
            key, err
        ))
    })?;

    decode_record(key, &data.into_bytes()).map(Some)
}

/// Unconditional write; replaces any existing document
async fn put_record(client: &Client, bucket: &str, key: &str, body: Bytes) -> Result<()> {
    let result = client
        .put_object()
        .bucket(bucket)
        .key(key)
        .content_type(CONTENT_TYPE)
        .body(ByteStream::from(body))
        .send()
        .await;

    match result {
        Ok(_) => {
            info!(key = %key, "Successfully wrote task document to S3");
            Ok(())
        }
        Err(err) => {
            error!(key = %key, error = %DisplayErrorContext(&err), "Failed to write task document to S3");
            Err(TaskError::storage_failure(format!(
                "S3 put_object failed for key '{}': {}",
                key,
                DisplayErrorContext(&err)
            )))
        }
    }
}

/// `If-None-Match` rejections: 412 when the key exists, 409 when a concurrent
/// conditional write won
fn is_existing_key(code: Option<&str>) -> bool {
    matches!(code, Some("PreconditionFailed") | Some("ConditionalRequestConflict"))
}

impl TaskRepository for S3TaskRepository {
    #[instrument(skip(self, task), fields(task_id = %task.id()))]
    fn insert(&self, task: &Task) -> impl std::future::Future<Output = Result<Task>> + Send {
        let client = self.client.clone();
        let bucket = self.bucket.clone();
        let id = task.id().clone();
        let key = Self::document_key(&self.collection, id.as_str());
        let record = TaskMapper::to_persistence(task);

        async move {
            let body = encode_record(&record)?;
            debug!(key = %key, bucket = %bucket, "Inserting task document into S3");

            let result = client
                .put_object()
                .bucket(&bucket)
                .key(&key)
                .content_type(CONTENT_TYPE)
                .if_none_match("*")
                .body(ByteStream::from(body))
                .send()
                .await;

            match result {
                Ok(_) => {
                    info!(key = %key, "Successfully inserted task document into S3");
                    TaskMapper::to_domain(record)
                }
                Err(err) if is_existing_key(err.as_service_error().and_then(|e| e.code())) => {
                    warn!(key = %key, "Task document already exists in S3");
                    Err(TaskError::DuplicateId(id))
                }
                Err(err) => {
                    error!(key = %key, error = %DisplayErrorContext(&err), "Failed to insert task document into S3");
                    Err(TaskError::storage_failure(format!(
                        "S3 put_object failed for key '{}': {}",
                        key,
                        DisplayErrorContext(&err)
                    )))
                }
            }
        }
        .instrument(Span::current())
    }

    #[instrument(skip(self, task), fields(task_id = %task.id()))]
    fn save(&self, task: &Task) -> impl std::future::Future<Output = Result<Task>> + Send {
        let client = self.client.clone();
        let bucket = self.bucket.clone();
        let key = Self::document_key(&self.collection, task.id().as_str());
        let record = TaskMapper::to_persistence(task);

        async move {
            let body = encode_record(&record)?;
            debug!(key = %key, bucket = %bucket, "Saving task document to S3");

            put_record(&client, &bucket, &key, body).await?;
            TaskMapper::to_domain(record)
        }
        .instrument(Span::current())
    }

    #[instrument(skip(self), fields(task_id = %id))]
    fn find_by_id(
        &self,
        id: &TaskId,
    ) -> impl std::future::Future<Output = Result<Option<Task>>> + Send {
        let client = self.client.clone();
        let bucket = self.bucket.clone();
        let key = Self::document_key(&self.collection, id.as_str());

        async move {
            fetch_record(&client, &bucket, &key)
                .await?
                .map(TaskMapper::to_domain)
                .transpose()
        }
        .instrument(Span::current())
    }

    #[instrument(skip(self))]
    fn find_all(&self) -> impl std::future::Future<Output = Result<Vec<Task>>> + Send {
        let client = self.client.clone();
        let bucket = self.bucket.clone();
        let prefix = Self::collection_prefix(&self.collection);

        async move {
            debug!(prefix = %prefix, bucket = %bucket, "Listing task documents in S3");

            let mut keys = Vec::new();
            let mut continuation_token: Option<String> = None;

            loop {
                let page = client
                    .list_objects_v2()
                    .bucket(&bucket)
                    .prefix(&prefix)
                    .set_continuation_token(continuation_token.take())
                    .send()
                    .await
                    .map_err(|err| {
                        error!(prefix = %prefix, error = %DisplayErrorContext(&err), "Failed to list task documents in S3");
                        TaskError::storage_failure(format!(
                            "S3 list_objects_v2 failed for prefix '{}': {}",
                            prefix,
                            DisplayErrorContext(&err)
                        ))
                    })?;

                keys.extend(
                    page.contents()
                        .iter()
                        .filter_map(|object| object.key())
                        .filter(|key| key.ends_with(DOCUMENT_EXTENSION))
                        .map(str::to_string),
                );

                match page.next_continuation_token() {
                    Some(token) if page.is_truncated().unwrap_or(false) => {
                        continuation_token = Some(token.to_string());
                    }
                    _ => break,
                }
            }

            let mut tasks = Vec::with_capacity(keys.len());
            for key in keys {
                // Deleted between listing and fetching
                if let Some(record) = fetch_record(&client, &bucket, &key).await? {
                    tasks.push(TaskMapper::to_domain(record)?);
                }
            }

            info!(count = tasks.len(), "Listed task documents from S3");
            Ok(tasks)
        }
        .instrument(Span::current())
    }

    #[instrument(skip(self), fields(task_id = %id))]
    fn delete(&self, id: &TaskId) -> impl std::future::Future<Output = Result<()>> + Send {
        let client = self.client.clone();
        let bucket = self.bucket.clone();
        let key = Self::document_key(&self.collection, id.as_str());

        async move {
            debug!(key = %key, bucket = %bucket, "Deleting task document from S3");

            match client
                .delete_object()
                .bucket(&bucket)
                .key(&key)
                .send()
                .await
            {
                Ok(_) => {
                    info!(key = %key, "Successfully deleted task document from S3");
                    Ok(())
                }
                Err(err) => {
                    error!(key = %key, error = %DisplayErrorContext(&err), "Failed to delete task document from S3");
                    Err(TaskError::storage_failure(format!(
                        "S3 delete_object failed for key '{}': {}",
                        key,
                        DisplayErrorContext(&err)
                    )))
                }
            }
        }
        .instrument(Span::current())
    }
}
