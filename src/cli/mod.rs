//! # Command-Line Interface
//!
//! Interactive session over the task board. The binary reads one command
//! per line from stdin and re-renders the visible list after each change.
//!
//! ## Session Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `add <message>` | Create a task |
//! | `edit <task-id>` | Edit a message in place (next line commits, `:cancel` aborts) |
//! | `done <task-id>` | Toggle completed |
//! | `fav <task-id>` | Toggle favorite |
//! | `rm <task-id>` | Delete a task |
//! | `all-done` | Complete every open task |
//! | `filter [text]` | Case-insensitive substring filter |
//! | `list` / `reload` / `help` / `quit` | Session control |
//!
//! Task IDs may be abbreviated to any unique substring.
//!
//! ## Flags
//!
//! `--format text|json` selects the output style, `--seed <file>` preloads
//! the session store from a JSON array of records, and `--verbose` enables
//! debug logging on stderr.
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and start the session.

mod app;
mod output;
mod session;

pub use app::{run, Cli};
pub use output::{Output, OutputFormat};
pub use session::{Command, Session};
