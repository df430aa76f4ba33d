//! Controllers: the per-task edit state machine and the list board
//!
//! Both are I/O-free apart from the board's store collaborator; everything a
//! rendering layer must react to is returned as plain data ([`EditAction`],
//! [`Change`]).

mod edit;
mod list;

pub use edit::{EditAction, EditState, TaskEditor};
pub use list::{Board, BoardError, Change};
