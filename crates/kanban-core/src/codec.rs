//! Row codec for the board file.
//!
//! A task is stored as one CSV row. Scalar fields map one-to-one; the
//! subtask list is packed into a single column:
//!
//! ```text
//! Sub1:False;Sub2:True
//! ```
//!
//! Each entry is split on its *last* `:`, so a label may contain `:` when
//! reading an existing file. New labels may not contain either delimiter
//! (see [`check_label`]). Decoding the subtask column never fails: a
//! missing or unrecognized state reads as unchecked.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::model::{ParseEnumError, Priority, Status, StatusSource, Subtask, Task};

/// Separates subtask entries.
pub const SUBTASK_SEPARATOR: char = ';';

/// Separates a subtask label from its state.
pub const STATE_SEPARATOR: char = ':';

const CHECKED: &str = "True";
const UNCHECKED: &str = "False";

/// Column headers of the board file, in order.
pub const HEADERS: [&str; 5] = ["Tarefa", "Status", "Categoria", "Prioridade", "Subtarefas"];

/// Encode subtasks as `label:True;label:False`.
#[must_use]
pub fn serialize_subtasks(subtasks: &[Subtask]) -> String {
    subtasks
        .iter()
        .map(|s| {
            let state = if s.done { CHECKED } else { UNCHECKED };
            format!("{}{STATE_SEPARATOR}{state}", s.label)
        })
        .collect::<Vec<_>>()
        .join(&SUBTASK_SEPARATOR.to_string())
}

/// Decode the subtask column. Blank entries are skipped.
#[must_use]
pub fn parse_subtasks(text: &str) -> Vec<Subtask> {
    text.split(SUBTASK_SEPARATOR)
        .filter(|chunk| !chunk.trim().is_empty())
        .map(|chunk| match chunk.rsplit_once(STATE_SEPARATOR) {
            Some((label, state)) => Subtask::new(label.trim(), state.trim() == CHECKED),
            None => Subtask::unchecked(chunk.trim()),
        })
        .collect()
}

/// Split a user-entered `a;b;c` list into trimmed, non-empty labels.
#[must_use]
pub fn split_labels(text: &str) -> Vec<String> {
    text.split(SUBTASK_SEPARATOR)
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Reject labels that would not survive a save/load cycle.
///
/// # Errors
///
/// Returns [`ValidationError::ReservedDelimiter`] when the label contains
/// `;` or `:`.
pub fn check_label(label: &str) -> Result<(), ValidationError> {
    for delimiter in [SUBTASK_SEPARATOR, STATE_SEPARATOR] {
        if label.contains(delimiter) {
            return Err(ValidationError::ReservedDelimiter {
                label: label.to_string(),
                delimiter,
            });
        }
    }
    Ok(())
}

/// One row of the board file, exactly as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRow {
    #[serde(rename = "Tarefa")]
    pub name: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Categoria", default)]
    pub category: String,
    #[serde(rename = "Prioridade")]
    pub priority: String,
    #[serde(rename = "Subtarefas", default)]
    pub subtasks: String,
}

impl TaskRow {
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            name: task.name.clone(),
            status: task.status.as_str().to_string(),
            category: task.category.clone(),
            priority: task.priority.as_str().to_string(),
            subtasks: serialize_subtasks(&task.subtasks),
        }
    }

    /// Decode the row into a task.
    ///
    /// # Errors
    ///
    /// Returns [`ParseEnumError`] when the status or priority token is not
    /// one of the known values.
    pub fn into_task(self) -> Result<Task, ParseEnumError> {
        let status: Status = self.status.parse()?;
        let priority: Priority = self.priority.parse()?;
        Ok(Task {
            name: self.name,
            status,
            category: self.category,
            priority,
            subtasks: parse_subtasks(&self.subtasks),
            status_source: StatusSource::Derived,
        })
    }
}
