//! Public operation surface of the board.
//!
//! Every mutating operation works on a copy of the committed board:
//!
//! 1. validate input and apply the change to the copy;
//! 2. persist the copy through the [`Store`];
//! 3. commit the copy and notify the view.
//!
//! If step 2 fails the committed board is untouched and the view is not
//! notified, so memory and disk never disagree.

use tracing::{info, warn};

use crate::board::{Board, Columns};
use crate::codec::{check_label, split_labels};
use crate::error::{KanbanError, ValidationError};
use crate::model::{Priority, Status, Subtask, Task};
use crate::status;
use crate::store::Store;

/// Callback invoked with the new board after each committed mutation.
pub type RenderHook = Box<dyn FnMut(&Board)>;

pub struct BoardController<S: Store> {
    board: Board,
    store: S,
    on_change: Option<RenderHook>,
}

impl<S: Store> BoardController<S> {
    /// Load the board from `store` and take ownership of both.
    ///
    /// # Errors
    ///
    /// Returns [`KanbanError::Persistence`] if the store cannot be loaded.
    pub fn open(mut store: S) -> Result<Self, KanbanError> {
        let board = store.load()?;
        info!(tasks = board.len(), "board opened");
        Ok(Self {
            board,
            store,
            on_change: None,
        })
    }

    /// Register the view's re-render callback, replacing any previous one.
    pub fn on_change(&mut self, hook: impl FnMut(&Board) + 'static) {
        self.on_change = Some(Box::new(hook));
    }

    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn columns(&self) -> Columns<'_> {
        self.board.columns()
    }

    /// Look up a task by name.
    ///
    /// # Errors
    ///
    /// Returns [`KanbanError::TaskNotFound`] if no task has this name.
    pub fn task(&self, name: &str) -> Result<&Task, KanbanError> {
        self.board
            .find_by_name(name)
            .ok_or_else(|| KanbanError::task_not_found(name))
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Give the store back, releasing the board.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Create a task in To Do with every subtask unchecked.
    ///
    /// `priority` accepts the stored tokens (`Alta`, `Média`, `Baixa`) or
    /// `high`/`medium`/`low`. `subtask_labels` is a `;`-separated list.
    ///
    /// # Errors
    ///
    /// Returns [`KanbanError::Validation`] if any field is blank, the
    /// priority is unknown, no label is given, a label contains `:`, or the
    /// name is already taken. Nothing is saved in that case.
    pub fn add_task(
        &mut self,
        name: &str,
        category: &str,
        priority: &str,
        subtask_labels: &str,
    ) -> Result<Task, KanbanError> {
        let name = required("name", name)?;
        let category = required("category", category)?;
        let priority: Priority = required("priority", priority)?
            .parse()
            .map_err(ValidationError::from)?;

        let labels = split_labels(subtask_labels);
        if labels.is_empty() {
            return Err(ValidationError::EmptyField { field: "subtasks" }.into());
        }
        for label in &labels {
            check_label(label)?;
        }

        if self.board.contains(name) {
            return Err(ValidationError::DuplicateTask {
                name: name.to_string(),
            }
            .into());
        }

        let task = Task::new(name, category, priority, labels);
        let mut candidate = self.board.clone();
        candidate.insert(task.clone())?;
        self.commit(candidate, "add_task", &task.name)?;
        Ok(task)
    }

    /// Check or uncheck subtask `index` (0-based) and re-derive the column.
    ///
    /// This is the only operation that re-derives status, so it also undoes
    /// an earlier manual move.
    ///
    /// # Errors
    ///
    /// Returns [`KanbanError::TaskNotFound`] / [`KanbanError::SubtaskNotFound`]
    /// for unknown targets and [`KanbanError::Persistence`] if saving fails.
    pub fn toggle_subtask(
        &mut self,
        task_name: &str,
        index: usize,
        done: bool,
    ) -> Result<Status, KanbanError> {
        let mut candidate = self.board.clone();
        let status = candidate
            .update_in_place(task_name, |task| {
                let len = task.subtasks.len();
                if index >= len {
                    return Err(KanbanError::SubtaskNotFound {
                        task: task.name.clone(),
                        index,
                        len,
                    });
                }
                task.subtasks[index].done = done;
                Ok(status::rederive(task))
            })
            .ok_or_else(|| KanbanError::task_not_found(task_name))??;

        self.commit(candidate, "toggle_subtask", task_name)?;
        Ok(status)
    }

    /// Append an unchecked subtask. The task's column is left as it is.
    ///
    /// # Errors
    ///
    /// Returns [`KanbanError::Validation`] for a blank label or one
    /// containing `;`/`:`, [`KanbanError::TaskNotFound`] for an unknown task.
    pub fn add_subtask(&mut self, task_name: &str, label: &str) -> Result<(), KanbanError> {
        let label = required("subtask", label)?;
        check_label(label)?;

        let mut candidate = self.board.clone();
        candidate
            .update_in_place(task_name, |task| task.subtasks.push(Subtask::unchecked(label)))
            .ok_or_else(|| KanbanError::task_not_found(task_name))?;

        self.commit(candidate, "add_subtask", task_name)
    }

    /// Delete a task. Asking the user for confirmation is the caller's job.
    ///
    /// # Errors
    ///
    /// Returns [`KanbanError::TaskNotFound`] without touching the store if
    /// no task has this name.
    pub fn remove_task(&mut self, task_name: &str) -> Result<Task, KanbanError> {
        let mut candidate = self.board.clone();
        let removed = candidate
            .remove_by_name(task_name)
            .ok_or_else(|| KanbanError::task_not_found(task_name))?;

        self.commit(candidate, "remove_task", task_name)?;
        Ok(removed)
    }

    /// Put a task in `target`, ignoring its subtasks (drag-and-drop).
    ///
    /// # Errors
    ///
    /// Returns [`KanbanError::TaskNotFound`] for an unknown task and
    /// [`KanbanError::Persistence`] if saving fails.
    pub fn move_task(&mut self, task_name: &str, target: Status) -> Result<(), KanbanError> {
        let mut candidate = self.board.clone();
        candidate
            .update_in_place(task_name, |task| status::apply_override(task, target))
            .ok_or_else(|| KanbanError::task_not_found(task_name))?;

        self.commit(candidate, "move_task", task_name)
    }

    fn commit(&mut self, candidate: Board, op: &'static str, task: &str) -> Result<(), KanbanError> {
        if let Err(err) = self.store.save(&candidate) {
            warn!(op, task, error = %err, "save failed, change discarded");
            return Err(err.into());
        }

        self.board = candidate;
        info!(op, task, "board updated");
        if let Some(hook) = self.on_change.as_mut() {
            hook(&self.board);
        }
        Ok(())
    }
}

/// Trimmed, non-empty, single-line field value.
fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    if value.contains(['\n', '\r']) {
        return Err(ValidationError::Multiline { field });
    }
    Ok(value)
}
