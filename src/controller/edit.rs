//! Per-task edit-mode state machine
//!
//! A [`TaskEditor`] wraps one task record and governs the transitions
//! between viewing and in-place message editing. It holds no I/O: every
//! transition that the outside world must act on is returned as an
//! [`EditAction`] for the collaborators to consume.

use tracing::debug;

use crate::domain::{TaskId, TaskPatch, TaskRecord};

/// Edit-mode state for a single task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Viewing,
    Editing,
}

/// Action emitted towards the collaborators
///
/// `FocusRequested` is addressed to the rendering layer; the update and
/// remove requests are addressed to whoever owns the store round-trip.
#[derive(Debug, Clone, PartialEq)]
pub enum EditAction {
    /// The edit input should receive focus
    FocusRequested,
    /// The given record should be sent to the store
    UpdateRequested(TaskRecord),
    /// The task with the given ID should be deleted
    RemoveRequested(TaskId),
}

/// Edit controller for one task
#[derive(Debug, Clone)]
pub struct TaskEditor {
    task: TaskRecord,
    state: EditState,
    buffer: String,
}

impl TaskEditor {
    /// Creates an editor in the viewing state
    pub fn new(task: TaskRecord) -> Self {
        let buffer = task.message.clone();
        Self {
            task,
            state: EditState::Viewing,
            buffer,
        }
    }

    /// Current state
    pub fn state(&self) -> EditState {
        self.state
    }

    /// Returns true while an edit is in progress
    pub fn is_editing(&self) -> bool {
        self.state == EditState::Editing
    }

    /// The record being edited
    pub fn task(&self) -> &TaskRecord {
        &self.task
    }

    /// The in-progress edit buffer
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Enters edit mode; the buffer is reset to the current message
    pub fn begin_edit(&mut self) -> Option<EditAction> {
        if self.is_editing() {
            return None;
        }

        self.state = EditState::Editing;
        self.buffer = self.task.message.clone();
        Some(EditAction::FocusRequested)
    }

    /// Replaces the edit buffer; a no-op outside edit mode
    pub fn set_buffer(&mut self, text: impl Into<String>) {
        if self.is_editing() {
            self.buffer = text.into();
        }
    }

    /// Commits the buffer
    ///
    /// An empty buffer is rejected and edit mode is kept. Otherwise the
    /// editor returns to viewing; an update is requested only when the
    /// buffer actually differs from the original message, so unchanged
    /// commits never reach the store.
    pub fn commit(&mut self) -> Option<EditAction> {
        if !self.is_editing() || self.buffer.is_empty() {
            return None;
        }

        self.state = EditState::Viewing;
        if self.buffer == self.task.message {
            return None;
        }

        debug!(id = %self.task.id, "message edit committed");
        Some(EditAction::UpdateRequested(
            self.task.with(TaskPatch::Message(self.buffer.clone())),
        ))
    }

    /// Leaves edit mode, restoring the buffer to the original message
    pub fn cancel(&mut self) {
        self.state = EditState::Viewing;
        self.buffer = self.task.message.clone();
    }

    /// The single edit control: enters edit mode when viewing, commits when
    /// editing
    pub fn press_edit(&mut self) -> Option<EditAction> {
        match self.state {
            EditState::Viewing => self.begin_edit(),
            EditState::Editing => self.commit(),
        }
    }

    /// Requests a completed-flag flip
    ///
    /// Built from the current record, not the in-progress buffer, and
    /// independent of edit state.
    pub fn toggle_completed(&self) -> EditAction {
        EditAction::UpdateRequested(self.task.with(TaskPatch::Completed(!self.task.completed)))
    }

    /// Requests a favorite-flag flip; same rules as [`toggle_completed`]
    ///
    /// [`toggle_completed`]: TaskEditor::toggle_completed
    pub fn toggle_favorite(&self) -> EditAction {
        EditAction::UpdateRequested(self.task.with(TaskPatch::Favorite(!self.task.favorite)))
    }

    /// Requests removal of the task; an in-progress edit is aborted
    pub fn remove(&mut self) -> EditAction {
        if self.is_editing() {
            self.cancel();
        }
        EditAction::RemoveRequested(self.task.id.clone())
    }

    /// Replaces the record after an authoritative store round-trip
    ///
    /// Outside edit mode the buffer follows the new message; mid-edit the
    /// in-progress buffer is kept.
    pub fn refresh(&mut self, record: TaskRecord) {
        if !self.is_editing() {
            self.buffer = record.message.clone();
        }
        self.task = record;
    }
}
