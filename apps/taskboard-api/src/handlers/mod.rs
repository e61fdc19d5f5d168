//! HTTP handlers

pub mod task;
