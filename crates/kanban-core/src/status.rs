//! Column rules for a task.
//!
//! Two writers share `Task::status`:
//!
//! - derivation from subtask completion ([`derive_status`] / [`rederive`]),
//!   which only runs when a subtask is toggled;
//! - a manual move ([`apply_override`]), which is taken as-is.
//!
//! Neither reconciles with the other. A fully checked task moved back to
//! To Do stays there until the next toggle re-derives it.

use tracing::debug;

use crate::model::{Status, StatusSource, Subtask, Task};

/// Column implied by subtask completion.
///
/// - nothing checked (including no subtasks) -> `Todo`
/// - some checked -> `InProgress`
/// - all checked -> `Done`
#[must_use]
pub fn derive_status(subtasks: &[Subtask]) -> Status {
    let total = subtasks.len();
    let checked = subtasks.iter().filter(|s| s.done).count();

    if checked == 0 {
        Status::Todo
    } else if checked < total {
        Status::InProgress
    } else {
        Status::Done
    }
}

/// Recompute `status` from the task's current subtasks.
pub fn rederive(task: &mut Task) -> Status {
    let status = derive_status(&task.subtasks);
    debug!(task = %task.name, from = %task.status, to = %status, "re-derived status");
    task.status = status;
    task.status_source = StatusSource::Derived;
    status
}

/// Put the task in `target` regardless of its subtasks.
pub fn apply_override(task: &mut Task, target: Status) {
    debug!(task = %task.name, from = %task.status, to = %target, "status override");
    task.status = target;
    task.status_source = StatusSource::Overridden;
}
