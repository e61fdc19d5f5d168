//! Task domain module
//!
//! The Task aggregate, its identity, the guards and errors it relies on, the
//! mapper to and from stored records, and the service running the use cases.

mod entity;
mod error;
pub mod guard;
mod ids;
mod mapper;
mod service;

pub use entity::{CreateTaskProps, Task, TaskStatus};
pub use error::{ErrorKind, Result, TaskError};
pub use ids::TaskId;
pub use mapper::{TaskDto, TaskMapper, TaskRecord};
pub use service::{NewTask, TaskService};
