use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::{error::Result, guard};

/// Identity of a Task
///
/// Wraps an opaque string so identifiers supplied by clients and identifiers
/// generated here share one type. Equality is by wrapped value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Generate a fresh TaskId (UUID v7, time-ordered)
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Build a TaskId from a caller-supplied value
    ///
    /// # Errors
    ///
    /// Returns `TaskError::Validation` if the value is empty or whitespace.
    pub fn parse(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        guard::not_blank(&value, "id")?;
        Ok(Self(value))
    }

    /// Get the wrapped value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TaskId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<TaskId> for String {
    fn from(id: TaskId) -> Self {
        id.0
    }
}
