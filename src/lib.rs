//! Tasklight - an interactive to-do list session for the terminal
//!
//! The engine fetches, creates, updates, completes, and deletes tasks
//! through a narrow store interface, with local filtering and in-place
//! message editing. Display order is always recomputed: incomplete tasks
//! first, completed tasks last, both groups stable.

pub mod cli;
pub mod config;
pub mod controller;
pub mod domain;
pub mod store;

pub use controller::{Board, BoardError, Change, EditAction, EditState, TaskEditor};
pub use domain::{order, TaskId, TaskPatch, TaskRecord};
pub use store::{MemoryStore, StoreError, TaskStore};
