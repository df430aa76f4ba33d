//! Interactive session loop
//!
//! A line-oriented shell over a [`Board`] and per-task editors. Commands
//! mirror the actions a task UI exposes: add, edit, done, fav, rm, filter,
//! all-done, list. While a message edit is in progress the next input line
//! is the edit buffer (committed on entry, like an Enter keypress), and
//! `:cancel` abandons it, like an Escape.

use std::io::BufRead;

use anyhow::Result;
use tracing::debug;

use super::output::Output;
use crate::config::Config;
use crate::controller::{Board, BoardError, Change, EditAction, TaskEditor};
use crate::domain::{TaskId, TaskRecord};
use crate::store::TaskStore;

/// One line of session input, parsed
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add(String),
    Edit(String),
    Done(String),
    Fav(String),
    Remove(String),
    AllDone,
    Filter(String),
    List,
    Reload,
    Help,
    Quit,
}

impl Command {
    /// Parses a trimmed input line; the error is a usage message
    pub fn parse(line: &str) -> Result<Command, String> {
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        let with_id = |make: fn(String) -> Command, name: &str| {
            if rest.is_empty() {
                Err(format!("usage: {} <task-id>", name))
            } else {
                Ok(make(rest.to_string()))
            }
        };

        match head {
            "add" => {
                if rest.is_empty() {
                    Err("usage: add <message>".into())
                } else {
                    Ok(Command::Add(rest.to_string()))
                }
            }
            "edit" => with_id(Command::Edit, "edit"),
            "done" => with_id(Command::Done, "done"),
            "fav" => with_id(Command::Fav, "fav"),
            "rm" => with_id(Command::Remove, "rm"),
            "all-done" => Ok(Command::AllDone),
            // A bare `filter` clears the filter
            "filter" => Ok(Command::Filter(rest.to_string())),
            "list" => Ok(Command::List),
            "reload" => Ok(Command::Reload),
            "help" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(format!("unknown command '{}'; try 'help'", other)),
        }
    }
}

/// How an ID query matched against the collection
#[derive(Debug, PartialEq)]
enum IdMatch {
    None,
    One(TaskId),
    Many(usize),
}

/// Resolves a query to a task ID: exact match first, then a unique
/// substring of the ID
fn resolve_id(tasks: &[TaskRecord], query: &str) -> IdMatch {
    if let Some(task) = tasks.iter().find(|t| t.id.as_str() == query) {
        return IdMatch::One(task.id.clone());
    }

    let matches: Vec<_> = tasks
        .iter()
        .filter(|t| t.id.as_str().contains(query))
        .collect();
    match matches.len() {
        0 => IdMatch::None,
        1 => IdMatch::One(matches[0].id.clone()),
        n => IdMatch::Many(n),
    }
}

#[derive(Debug, PartialEq)]
enum Flow {
    Continue,
    Quit,
}

enum Toggle {
    Completed,
    Favorite,
}

/// Interactive session over a board and its store
pub struct Session<S: TaskStore> {
    board: Board<S>,
    /// Editor for the task currently being edited, if any
    editor: Option<TaskEditor>,
    config: Config,
    output: Output,
}

impl<S: TaskStore> Session<S> {
    pub fn new(board: Board<S>, config: Config, output: Output) -> Self {
        Self {
            board,
            editor: None,
            config,
            output,
        }
    }

    /// Loads the collection and processes input lines until `quit` or EOF
    pub fn run(&mut self, input: impl BufRead) -> Result<()> {
        let loaded = self.board.load_all();
        self.finish(loaded);

        for line in input.lines() {
            let line = line?;
            if self.handle_line(line.trim()) == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    fn handle_line(&mut self, line: &str) -> Flow {
        if self.editor.is_some() {
            self.handle_edit_input(line);
            return Flow::Continue;
        }

        if line.is_empty() {
            return Flow::Continue;
        }

        debug!(line, "dispatching command");
        match Command::parse(line) {
            Ok(command) => self.dispatch(command),
            Err(usage) => {
                self.output.error(&usage);
                Flow::Continue
            }
        }
    }

    fn dispatch(&mut self, command: Command) -> Flow {
        match command {
            Command::Add(message) => {
                let message = self.config.bound_message(&message).to_string();
                self.board.set_draft(&message);
                let result = self.board.create();
                self.finish(result);
            }
            Command::Edit(query) => self.begin_edit(&query),
            Command::Done(query) => self.toggle(&query, Toggle::Completed),
            Command::Fav(query) => self.toggle(&query, Toggle::Favorite),
            Command::Remove(query) => {
                if let Some(record) = self.lookup(&query) {
                    let mut editor = TaskEditor::new(record);
                    if let EditAction::RemoveRequested(id) = editor.remove() {
                        let result = self.board.remove(&id);
                        self.finish(result);
                    }
                }
            }
            Command::AllDone => {
                let result = self.board.complete_all();
                self.finish(result);
            }
            Command::Filter(text) => {
                self.board.set_filter(&text);
                self.render();
            }
            Command::List => self.render(),
            Command::Reload => {
                let result = self.board.load_all();
                self.finish(result);
            }
            Command::Help => self.print_help(),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    /// Edit-mode input: the line is the buffer, `:cancel` aborts
    fn handle_edit_input(&mut self, line: &str) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };

        if line == ":cancel" {
            editor.cancel();
            self.editor = None;
            self.output.success("Edit cancelled");
            return;
        }

        editor.set_buffer(self.config.bound_message(line));
        match editor.commit() {
            Some(EditAction::UpdateRequested(record)) => {
                self.editor = None;
                let result = self.board.update(&record);
                self.finish(result);
            }
            Some(_) => {}
            None if editor.is_editing() => {
                self.output
                    .error("Message must not be empty; still editing (:cancel to abort)");
            }
            None => {
                // Buffer matched the original message: no store call
                self.editor = None;
                self.output.success("No change");
            }
        }
    }

    fn begin_edit(&mut self, query: &str) {
        let Some(record) = self.lookup(query) else {
            return;
        };

        let mut editor = TaskEditor::new(record);
        if editor.begin_edit() == Some(EditAction::FocusRequested) {
            self.output.success(&format!(
                "Editing {} ('{}'); type the new message, or :cancel",
                editor.task().id,
                editor.buffer()
            ));
        }
        self.editor = Some(editor);
    }

    fn toggle(&mut self, query: &str, which: Toggle) {
        let Some(record) = self.lookup(query) else {
            return;
        };

        let editor = TaskEditor::new(record);
        let action = match which {
            Toggle::Completed => editor.toggle_completed(),
            Toggle::Favorite => editor.toggle_favorite(),
        };
        if let EditAction::UpdateRequested(updated) = action {
            let result = self.board.update(&updated);
            self.finish(result);
        }
    }

    fn lookup(&self, query: &str) -> Option<TaskRecord> {
        match resolve_id(self.board.tasks(), query) {
            IdMatch::One(id) => self.board.get(&id).cloned(),
            IdMatch::None => {
                self.output.error(&format!("No task matches '{}'", query));
                None
            }
            IdMatch::Many(n) => {
                self.output
                    .error(&format!("'{}' is ambiguous ({} matches)", query, n));
                None
            }
        }
    }

    /// Announces a successful change and re-renders; errors are printed and
    /// the session keeps going
    fn finish(&mut self, result: Result<Change, BoardError>) {
        match result {
            Ok(Change::Noop) => {}
            Ok(change) => {
                self.announce(&change);
                self.render();
            }
            Err(e) => self.output.error(&e.to_string()),
        }
    }

    fn announce(&self, change: &Change) {
        match change {
            Change::Loaded(n) => self.output.success(&format!("Loaded {} tasks", n)),
            Change::Created(id) => self.output.success(&format!("Added {}", id)),
            Change::Updated(id) => self.output.success(&format!("Updated {}", id)),
            Change::Removed(id) => self.output.success(&format!("Removed {}", id)),
            Change::CompletedAll(n) => self.output.success(&format!("Completed {} tasks", n)),
            Change::Noop => {}
        }
    }

    fn render(&self) {
        let visible = self.board.visible_tasks();

        if self.output.is_json() {
            self.output.data(&visible);
            return;
        }

        if visible.is_empty() {
            if self.board.filter().is_empty() {
                self.output.success("No tasks");
            } else {
                self.output.success("No tasks match the filter");
            }
            return;
        }

        for task in visible {
            let check = if task.completed { "[x]" } else { "[ ]" };
            let star = if task.favorite { "*" } else { " " };
            self.output
                .row(&[check, star, task.id.as_str(), &task.message]);
        }
    }

    fn print_help(&self) {
        self.output.row(&["add <message>", "create a task"]);
        self.output.row(&["edit <task-id>", "edit a task's message"]);
        self.output.row(&["done <task-id>", "toggle completed"]);
        self.output.row(&["fav <task-id>", "toggle favorite"]);
        self.output.row(&["rm <task-id>", "delete a task"]);
        self.output.row(&["all-done", "complete every open task"]);
        self.output.row(&["filter [text]", "filter by message substring"]);
        self.output.row(&["list", "show the visible tasks"]);
        self.output.row(&["reload", "refetch the collection"]);
        self.output.row(&["quit", "leave the session"]);
    }
}
