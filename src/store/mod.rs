//! # Store Layer
//!
//! The external system of record for tasks, behind a narrow trait.
//!
//! The core only ever talks to a [`TaskStore`]; what sits behind it (an HTTP
//! API, a database, the bundled [`MemoryStore`]) is not its concern. Calls
//! are sequential from a single logical thread of control, and the records a
//! store returns are authoritative: it may normalize fields such as
//! `modified`, and callers replace their local copies with what comes back.
//!
//! Every failure surfaces as a [`StoreError`]. Nothing here is fatal; all
//! failures are local and recoverable by retry at the caller's discretion.

mod memory;

pub use memory::MemoryStore;

use thiserror::Error;

use crate::domain::{TaskId, TaskRecord};

/// Any failure reaching the core from the external store
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached or answered abnormally
    #[error("Store transport failure: {0}")]
    Transport(String),

    /// The store accepted the call but the payload was malformed
    #[error("Malformed task payload: {0}")]
    Payload(String),

    /// The store has no task with the given ID
    #[error("No task with ID {0}")]
    NotFound(TaskId),
}

/// System of record for tasks
pub trait TaskStore {
    /// Fetches the full collection, in no guaranteed order
    fn fetch_all(&self) -> Result<Vec<TaskRecord>, StoreError>;

    /// Creates a task from a message; the store assigns the ID
    fn create(&self, message: &str) -> Result<TaskRecord, StoreError>;

    /// Replaces a task wholesale, returning the stored record
    fn update(&self, record: &TaskRecord) -> Result<TaskRecord, StoreError>;

    /// Deletes a task by ID
    fn remove(&self, id: &TaskId) -> Result<(), StoreError>;

    /// Marks the given tasks completed, returning the stored records
    fn complete_all(&self, records: &[TaskRecord]) -> Result<Vec<TaskRecord>, StoreError>;
}
