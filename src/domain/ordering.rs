//! Display ordering for task lists
//!
//! Incomplete tasks come first, completed tasks second, and relative input
//! order is preserved within each group. Callers prepend new or updated
//! records to the input before ordering, so a fresh incomplete task surfaces
//! at the top of its group.

use super::task::TaskRecord;

/// Stable partition of tasks: incomplete first, completed last
///
/// Pure and total: empty input produces empty output, and applying it twice
/// gives the same result as applying it once. `completed` is the only
/// ordering key; duplicates pass through untouched (uniqueness by ID is the
/// collection owner's job).
pub fn order(tasks: Vec<TaskRecord>) -> Vec<TaskRecord> {
    let (mut ordered, done): (Vec<_>, Vec<_>) =
        tasks.into_iter().partition(|task| !task.completed);
    ordered.extend(done);
    ordered
}
