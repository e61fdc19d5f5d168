//! # Taskboard S3 adapter
//!
//! Implements the `TaskRepository` port on top of an S3-compatible bucket used
//! as a document store: each task is one JSON document at
//! `<collection>/<task id>.json`.

pub mod infrastructure;

pub use infrastructure::{ConnectOptions, S3TaskRepository};
