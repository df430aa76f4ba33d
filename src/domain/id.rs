//! Opaque task identifiers
//!
//! IDs are assigned by the store, never by the core: the collection treats
//! them as opaque strings that are unique and immutable once assigned.
//! The bundled in-memory store derives them as `t-{7-char-hash}` from the
//! message and creation timestamp, so the same message created at different
//! times produces different IDs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Task ID must not be empty")]
    Empty,
}

/// Task ID, unique within the active collection
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskId(String);

impl TaskId {
    /// Derives an ID from a message and creation timestamp
    pub fn derive(message: &str, timestamp: DateTime<Utc>) -> Self {
        let input = format!(
            "{}{}",
            message,
            timestamp.timestamp_nanos_opt().unwrap_or(0)
        );
        let hash = blake3::hash(input.as_bytes());
        let hex = hash.to_hex();
        Self(format!("t-{}", &hex[..7]))
    }

    /// Returns the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TaskId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(IdError::Empty);
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for TaskId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TaskId> for String {
    fn from(id: TaskId) -> Self {
        id.0
    }
}
