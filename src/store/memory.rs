//! In-memory system of record
//!
//! Backs the interactive session and the tests. Records are held in arrival
//! order, but `fetch_all` makes no ordering promise: display order is always
//! recomputed by the caller.

use std::cell::RefCell;
use std::collections::HashSet;

use chrono::Utc;
use tracing::debug;

use super::{StoreError, TaskStore};
use crate::domain::{TaskId, TaskRecord};

/// In-memory task store with interior mutability
///
/// Single-threaded by design, matching the sequential execution model of the
/// callers.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tasks: RefCell<Vec<TaskRecord>>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store preloaded with the given records
    ///
    /// Duplicate IDs are rejected: the collection is keyed by ID.
    pub fn seeded(records: Vec<TaskRecord>) -> Result<Self, StoreError> {
        let mut seen = HashSet::new();
        for record in &records {
            if !seen.insert(record.id.clone()) {
                return Err(StoreError::Payload(format!(
                    "duplicate task ID {}",
                    record.id
                )));
            }
        }

        Ok(Self {
            tasks: RefCell::new(records),
        })
    }

    /// Number of records currently held
    pub fn len(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Returns true when the store holds no records
    pub fn is_empty(&self) -> bool {
        self.tasks.borrow().is_empty()
    }
}

impl TaskStore for MemoryStore {
    fn fetch_all(&self) -> Result<Vec<TaskRecord>, StoreError> {
        Ok(self.tasks.borrow().clone())
    }

    fn create(&self, message: &str) -> Result<TaskRecord, StoreError> {
        if message.is_empty() {
            return Err(StoreError::Payload("message must not be empty".into()));
        }

        let now = Utc::now();
        let mut task = TaskRecord::new(TaskId::derive(message, now), message);
        task.modified = Some(now);

        debug!(id = %task.id, "created task");
        self.tasks.borrow_mut().push(task.clone());
        Ok(task)
    }

    fn update(&self, record: &TaskRecord) -> Result<TaskRecord, StoreError> {
        let mut tasks = self.tasks.borrow_mut();
        let slot = tasks
            .iter_mut()
            .find(|t| t.id == record.id)
            .ok_or_else(|| StoreError::NotFound(record.id.clone()))?;

        let mut stored = record.clone();
        stored.modified = Some(Utc::now());
        *slot = stored.clone();

        debug!(id = %stored.id, "updated task");
        Ok(stored)
    }

    fn remove(&self, id: &TaskId) -> Result<(), StoreError> {
        let mut tasks = self.tasks.borrow_mut();
        let position = tasks
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        tasks.remove(position);
        debug!(%id, "removed task");
        Ok(())
    }

    fn complete_all(&self, records: &[TaskRecord]) -> Result<Vec<TaskRecord>, StoreError> {
        records
            .iter()
            .map(|record| {
                let mut completed = record.clone();
                completed.completed = true;
                self.update(&completed)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_assigns_id_and_stamps_modified() {
        let store = MemoryStore::new();

        let task = store.create("Buy milk").unwrap();

        assert_eq!(task.message, "Buy milk");
        assert!(!task.completed);
        assert!(task.modified.is_some());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn created_ids_are_unique() {
        let store = MemoryStore::new();

        let a = store.create("Same message").unwrap();
        let b = store.create("Same message").unwrap();

        assert_ne!(a.id, b.id);
    }

    #[test]
    fn create_rejects_empty_message() {
        let store = MemoryStore::new();

        assert!(matches!(store.create(""), Err(StoreError::Payload(_))));
    }

    #[test]
    fn update_replaces_and_restamps() {
        let store = MemoryStore::new();
        let task = store.create("Buy milk").unwrap();

        let mut edited = task.clone();
        edited.message = "Buy oat milk".into();
        let stored = store.update(&edited).unwrap();

        assert_eq!(stored.message, "Buy oat milk");
        assert!(stored.modified >= task.modified);

        let all = store.fetch_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].message, "Buy oat milk");
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let store = MemoryStore::new();
        let ghost = TaskRecord::new("t-0000000".parse().unwrap(), "Ghost");

        assert!(matches!(
            store.update(&ghost),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn remove_deletes_the_record() {
        let store = MemoryStore::new();
        let task = store.create("Buy milk").unwrap();

        store.remove(&task.id).unwrap();

        assert!(store.is_empty());
        assert!(matches!(
            store.remove(&task.id),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn complete_all_returns_completed_records() {
        let store = MemoryStore::new();
        let a = store.create("One").unwrap();
        let b = store.create("Two").unwrap();

        let confirmed = store.complete_all(&[a, b]).unwrap();

        assert_eq!(confirmed.len(), 2);
        assert!(confirmed.iter().all(|t| t.completed));
        assert!(store.fetch_all().unwrap().iter().all(|t| t.completed));
    }

    #[test]
    fn seeded_rejects_duplicate_ids() {
        let task = TaskRecord::new("t-1234567".parse().unwrap(), "Twice");

        let result = MemoryStore::seeded(vec![task.clone(), task]);

        assert!(matches!(result, Err(StoreError::Payload(_))));
    }

    #[test]
    fn seeded_store_serves_its_records() {
        let task = TaskRecord::new("t-1234567".parse().unwrap(), "Seeded");
        let store = MemoryStore::seeded(vec![task.clone()]).unwrap();

        assert_eq!(store.fetch_all().unwrap(), vec![task]);
    }
}
