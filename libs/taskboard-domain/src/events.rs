//! Task lifecycle events
//!
//! An [`EventBus`] is built once at startup, handlers are registered on it,
//! and it is handed to the service behind an `Arc`. There is no global
//! registry: two buses never see each other's events.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::task::TaskId;

/// What happened to a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskEventKind {
    Created,
    Resolved,
    Deleted,
}

impl TaskEventKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Resolved => "resolved",
            Self::Deleted => "deleted",
        }
    }
}

impl fmt::Display for TaskEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lifecycle transition that has been persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskEvent {
    pub kind: TaskEventKind,
    pub task_id: TaskId,
    pub occurred_at: DateTime<Utc>,
}

impl TaskEvent {
    /// Stamp an event with the current time
    pub fn now(kind: TaskEventKind, task_id: TaskId) -> Self {
        Self {
            kind,
            task_id,
            occurred_at: Utc::now(),
        }
    }
}

type Handler = Box<dyn Fn(&TaskEvent) + Send + Sync>;

/// Synchronous fan-out of task events to registered handlers
#[derive(Default)]
pub struct EventBus {
    handlers: Vec<Handler>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler; handlers run in registration order
    pub fn subscribe<F>(&mut self, handler: F)
    where
        F: Fn(&TaskEvent) + Send + Sync + 'static,
    {
        self.handlers.push(Box::new(handler));
    }

    pub fn publish(&self, event: &TaskEvent) {
        for handler in &self.handlers {
            handler(event);
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
