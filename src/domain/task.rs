//! Task record and typed patches
//!
//! A [`TaskRecord`] is the canonical data shape for one task. The core never
//! mutates a record in place: every change goes through [`TaskRecord::with`],
//! producing a new record that replaces the old one by ID.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::TaskId;

/// The canonical data shape for one task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Unique identifier, assigned by the store on creation
    pub id: TaskId,

    /// Free-text description, bounded by the input surface
    pub message: String,

    /// Whether the task is done
    #[serde(default)]
    pub completed: bool,

    /// Whether the task is starred
    #[serde(default)]
    pub favorite: bool,

    /// Last-modified timestamp, stamped by the store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
}

impl TaskRecord {
    /// Creates a new record with the given ID and message
    pub fn new(id: TaskId, message: impl Into<String>) -> Self {
        Self {
            id,
            message: message.into(),
            completed: false,
            favorite: false,
            modified: None,
        }
    }

    /// Applies a patch, producing a new record
    ///
    /// `id` never changes and `modified` is left alone: the store stamps it
    /// when the change round-trips.
    pub fn with(&self, patch: TaskPatch) -> TaskRecord {
        let mut next = self.clone();
        match patch {
            TaskPatch::Message(message) => next.message = message,
            TaskPatch::Completed(completed) => next.completed = completed,
            TaskPatch::Favorite(favorite) => next.favorite = favorite,
        }
        next
    }
}

/// A single-field change to a task record
///
/// Closed set of patchable fields; `id` and `modified` are deliberately
/// absent (immutable and store-owned, respectively).
#[derive(Debug, Clone, PartialEq)]
pub enum TaskPatch {
    Message(String),
    Completed(bool),
    Favorite(bool),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_task(message: &str) -> TaskRecord {
        let id = TaskId::derive(message, Utc::now());
        TaskRecord::new(id, message)
    }

    #[test]
    fn new_record_defaults() {
        let task = make_task("Buy milk");

        assert!(!task.completed);
        assert!(!task.favorite);
        assert!(task.modified.is_none());
    }

    #[test]
    fn patch_changes_only_the_named_field() {
        let task = make_task("Buy milk");

        let done = task.with(TaskPatch::Completed(true));
        assert!(done.completed);
        assert_eq!(done.id, task.id);
        assert_eq!(done.message, task.message);
        assert_eq!(done.favorite, task.favorite);

        let starred = task.with(TaskPatch::Favorite(true));
        assert!(starred.favorite);
        assert!(!starred.completed);

        let renamed = task.with(TaskPatch::Message("Buy oat milk".into()));
        assert_eq!(renamed.message, "Buy oat milk");
        assert_eq!(renamed.id, task.id);
    }

    #[test]
    fn patch_does_not_mutate_the_original() {
        let task = make_task("Buy milk");
        let _ = task.with(TaskPatch::Completed(true));

        assert!(!task.completed);
    }

    #[test]
    fn deserializes_with_missing_flags() {
        let json = r#"{"id":"t-1234567","message":"Buy milk"}"#;
        let task: TaskRecord = serde_json::from_str(json).unwrap();

        assert!(!task.completed);
        assert!(!task.favorite);
        assert!(task.modified.is_none());
    }

    #[test]
    fn serde_roundtrip() {
        let mut task = make_task("Buy milk");
        task.modified = Some(Utc::now());

        let json = serde_json::to_string(&task).unwrap();
        let parsed: TaskRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(task, parsed);
    }
}
