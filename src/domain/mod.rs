//! Domain models for Tasklight
//!
//! Contains the core business logic without any I/O concerns.

mod id;
mod ordering;
mod task;

pub use id::{IdError, TaskId};
pub use ordering::order;
pub use task::{TaskPatch, TaskRecord};
