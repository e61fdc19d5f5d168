//! Guard clauses run before a domain object is constructed.

use super::error::{Result, TaskError};

/// Fail when a required argument is absent.
pub fn required<T>(value: Option<T>, name: &str) -> Result<T> {
    value.ok_or_else(|| TaskError::validation(format!("{name} is required")))
}

/// Fail when text is empty after trimming.
pub fn not_blank<'a>(value: &'a str, name: &str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(TaskError::validation(format!("{name} must not be empty")));
    }
    Ok(value)
}

/// `required` followed by `not_blank`.
pub fn required_text(value: Option<String>, name: &str) -> Result<String> {
    let value = required(value, name)?;
    not_blank(&value, name)?;
    Ok(value)
}
