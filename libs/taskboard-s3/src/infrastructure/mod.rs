//! Infrastructure adapters backed by AWS S3

mod s3_repository;

pub use s3_repository::{ConnectOptions, S3TaskRepository};
