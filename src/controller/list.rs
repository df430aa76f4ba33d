//! List controller: owns the task collection and orchestrates store calls
//!
//! A [`Board`] holds the ordered collection, the lower-cased filter text,
//! the new-task draft, and an advisory fetch-in-progress flag. Every
//! mutating operation round-trips through the [`TaskStore`] and replaces
//! local records with what the store returns.

use std::cell::Cell;

use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{order, TaskId, TaskRecord};
use crate::store::{StoreError, TaskStore};

/// Failure of a board operation
#[derive(Debug, Error)]
pub enum BoardError {
    /// A mutating operation was attempted while another was in flight
    #[error("Another store operation is already in flight")]
    Busy,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What a successful operation did, for the rendering layer to consume
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    /// The collection was replaced with `n` fetched tasks
    Loaded(usize),
    Created(TaskId),
    Updated(TaskId),
    Removed(TaskId),
    /// `n` previously incomplete tasks were confirmed completed
    CompletedAll(usize),
    /// Nothing to do (empty draft, everything already completed)
    Noop,
}

/// Fetch-in-progress flag with scoped acquisition
///
/// At most one store round-trip may be outstanding; a second acquisition
/// fails instead of queueing. Release happens on guard drop, so the flag is
/// cleared on the error paths too.
#[derive(Debug, Default)]
struct FetchFlag(Cell<bool>);

struct FetchGuard<'a>(&'a Cell<bool>);

impl FetchFlag {
    fn acquire(&self) -> Result<FetchGuard<'_>, BoardError> {
        if self.0.get() {
            return Err(BoardError::Busy);
        }
        self.0.set(true);
        Ok(FetchGuard(&self.0))
    }

    fn is_set(&self) -> bool {
        self.0.get()
    }
}

impl Drop for FetchGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Aggregate controller for the task collection
pub struct Board<S: TaskStore> {
    store: S,
    /// Ordered collection, unique by ID
    tasks: Vec<TaskRecord>,
    /// Lower-cased filter text
    filter: String,
    /// Draft message for the next created task
    draft: String,
    fetching: FetchFlag,
}

impl<S: TaskStore> Board<S> {
    /// Creates a board over the given store, with an empty collection
    pub fn new(store: S) -> Self {
        Self {
            store,
            tasks: Vec::new(),
            filter: String::new(),
            draft: String::new(),
            fetching: FetchFlag::default(),
        }
    }

    /// The full ordered collection
    pub fn tasks(&self) -> &[TaskRecord] {
        &self.tasks
    }

    /// Looks up a task by ID
    pub fn get(&self, id: &TaskId) -> Option<&TaskRecord> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// Current filter text (always lower-cased)
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Current new-task draft
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// True while a store round-trip is outstanding
    pub fn is_fetching(&self) -> bool {
        self.fetching.is_set()
    }

    /// Sets the new-task draft message
    pub fn set_draft(&mut self, text: &str) {
        self.draft = text.to_string();
    }

    /// Stores the filter text, lower-cased
    ///
    /// Nothing is recomputed eagerly; the visible subset is derived on
    /// demand by [`visible_tasks`](Board::visible_tasks).
    pub fn set_filter(&mut self, text: &str) {
        self.filter = text.to_lowercase();
    }

    /// Tasks whose message contains the filter as a case-insensitive
    /// substring, derived fresh from the current collection
    pub fn visible_tasks(&self) -> Vec<&TaskRecord> {
        self.tasks
            .iter()
            .filter(|t| t.message.to_lowercase().contains(&self.filter))
            .collect()
    }

    /// True iff every task is completed; vacuously true when empty
    pub fn all_completed(&self) -> bool {
        self.tasks.iter().all(|t| t.completed)
    }

    /// Replaces the collection with the store's full task list
    ///
    /// On failure the prior collection, possibly empty, is retained.
    pub fn load_all(&mut self) -> Result<Change, BoardError> {
        let _fetch = self.fetching.acquire()?;

        let tasks = match self.store.fetch_all() {
            Ok(tasks) => tasks,
            Err(e) => {
                warn!(error = %e, "fetch failed, keeping last known collection");
                return Err(e.into());
            }
        };

        debug!(count = tasks.len(), "loaded tasks");
        self.tasks = order(tasks);
        Ok(Change::Loaded(self.tasks.len()))
    }

    /// Creates a task from the draft message
    ///
    /// A no-op when the draft is empty. The created record is prepended
    /// before re-ordering so it surfaces at the top of the incomplete group,
    /// and the draft is cleared only once the store confirms.
    pub fn create(&mut self) -> Result<Change, BoardError> {
        if self.draft.is_empty() {
            return Ok(Change::Noop);
        }

        let _fetch = self.fetching.acquire()?;
        let created = self.store.create(&self.draft)?;
        let id = created.id.clone();

        Self::replace_record(&mut self.tasks, created);
        self.draft.clear();
        Ok(Change::Created(id))
    }

    /// Sends a merged record to the store and adopts what comes back
    ///
    /// The store is authoritative: the returned record replaces the local
    /// one even when it differs from what was sent.
    pub fn update(&mut self, record: &TaskRecord) -> Result<Change, BoardError> {
        let _fetch = self.fetching.acquire()?;
        let stored = self.store.update(record)?;
        let id = stored.id.clone();

        Self::replace_record(&mut self.tasks, stored);
        Ok(Change::Updated(id))
    }

    /// Deletes a task from the store and the local collection
    pub fn remove(&mut self, id: &TaskId) -> Result<Change, BoardError> {
        let _fetch = self.fetching.acquire()?;
        self.store.remove(id)?;

        self.tasks.retain(|t| &t.id != id);
        Ok(Change::Removed(id.clone()))
    }

    /// Completes every incomplete task through the bulk store operation
    ///
    /// A no-op when everything is already completed. The collection is
    /// reconciled from the records the store confirms, not from the
    /// pre-request snapshot.
    pub fn complete_all(&mut self) -> Result<Change, BoardError> {
        if self.all_completed() {
            return Ok(Change::Noop);
        }

        let _fetch = self.fetching.acquire()?;
        let open: Vec<TaskRecord> = self
            .tasks
            .iter()
            .filter(|t| !t.completed)
            .cloned()
            .collect();
        let confirmed = self.store.complete_all(&open)?;

        let count = confirmed.len();
        for record in confirmed {
            if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == record.id) {
                *slot = record;
            }
        }
        self.tasks = order(std::mem::take(&mut self.tasks));
        Ok(Change::CompletedAll(count))
    }

    /// Prepends a store-confirmed record, dropping any stale copy, and
    /// re-orders
    fn replace_record(tasks: &mut Vec<TaskRecord>, record: TaskRecord) {
        let id = record.id.clone();
        let mut next = Vec::with_capacity(tasks.len() + 1);
        next.push(record);
        next.extend(tasks.drain(..).filter(|t| t.id != id));
        *tasks = order(next);
    }
}
