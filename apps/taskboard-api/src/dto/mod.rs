//! Request and response bodies

pub mod task;
