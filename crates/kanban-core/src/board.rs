//! In-memory task collection keyed by name.
//!
//! Tasks keep the order they were inserted in, which is also the order the
//! rows appear in the board file. Names are unique: [`Board::insert`]
//! refuses a second task with an existing name, so every lookup resolves to
//! at most one task.

use serde::Serialize;
use tracing::debug;

use crate::error::ValidationError;
use crate::model::{Status, Task};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Board {
    tasks: Vec<Task>,
}

impl Board {
    #[must_use]
    pub const fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Build a board from tasks in order, rejecting duplicate names.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DuplicateTask`] on the first repeated name.
    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>) -> Result<Self, ValidationError> {
        let mut board = Self::new();
        for task in tasks {
            board.insert(task)?;
        }
        Ok(board)
    }

    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.name == name)
    }

    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.name == name)
    }

    /// Append a task.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DuplicateTask`] if the name is taken.
    pub fn insert(&mut self, task: Task) -> Result<(), ValidationError> {
        if self.contains(&task.name) {
            return Err(ValidationError::DuplicateTask { name: task.name });
        }
        debug!(task = %task.name, "insert");
        self.tasks.push(task);
        Ok(())
    }

    /// Remove and return the task with this name.
    pub fn remove_by_name(&mut self, name: &str) -> Option<Task> {
        let idx = self.position(name)?;
        debug!(task = %name, "remove");
        Some(self.tasks.remove(idx))
    }

    /// Run `mutator` against the named task, if present.
    pub fn update_in_place<R>(&mut self, name: &str, mutator: impl FnOnce(&mut Task) -> R) -> Option<R> {
        self.find_by_name_mut(name).map(mutator)
    }

    /// Tasks grouped by column, each in board order.
    #[must_use]
    pub fn columns(&self) -> Columns<'_> {
        let mut columns = Columns::default();
        for task in &self.tasks {
            columns.column_mut(task.status).push(task);
        }
        columns
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.name == name)
    }
}

impl<'a> IntoIterator for &'a Board {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}

/// Snapshot of the three columns for rendering.
#[derive(Debug, Default, Serialize)]
pub struct Columns<'a> {
    pub todo: Vec<&'a Task>,
    pub in_progress: Vec<&'a Task>,
    pub done: Vec<&'a Task>,
}

impl<'a> Columns<'a> {
    #[must_use]
    pub fn get(&self, status: Status) -> &[&'a Task] {
        match status {
            Status::Todo => &self.todo,
            Status::InProgress => &self.in_progress,
            Status::Done => &self.done,
        }
    }

    fn column_mut(&mut self, status: Status) -> &mut Vec<&'a Task> {
        match status {
            Status::Todo => &mut self.todo,
            Status::InProgress => &mut self.in_progress,
            Status::Done => &mut self.done,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Priority;

    fn task(name: &str) -> Task {
        Task::new(name, "Geral", Priority::Medium, ["a"])
    }

    #[test]
    fn insert_rejects_duplicate_names() {
        let mut board = Board::new();
        board.insert(task("one")).unwrap();

        let err = board.insert(task("one")).unwrap_err();
        assert_eq!(
            err,
            ValidationError::DuplicateTask {
                name: "one".to_string()
            }
        );
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn lookup_is_exact_match() {
        let board = Board::from_tasks([task("Write"), task("Writer")]).unwrap();
        assert_eq!(board.find_by_name("Writer").unwrap().name, "Writer");
        assert!(board.find_by_name("write").is_none());
    }

    #[test]
    fn remove_returns_task_and_keeps_order() {
        let mut board = Board::from_tasks([task("a"), task("b"), task("c")]).unwrap();
        let removed = board.remove_by_name("b").unwrap();
        assert_eq!(removed.name, "b");

        let names: Vec<_> = board.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["a", "c"]);
        assert!(board.remove_by_name("b").is_none());
    }

    #[test]
    fn update_in_place_reports_missing() {
        let mut board = Board::from_tasks([task("a")]).unwrap();
        let updated = board.update_in_place("a", |t| {
            t.category = "Casa".to_string();
            t.category.len()
        });
        assert_eq!(updated, Some(4));
        assert_eq!(board.find_by_name("a").unwrap().category, "Casa");
        assert!(board.update_in_place("zzz", |_| ()).is_none());
    }

    #[test]
    fn columns_group_by_status_in_board_order() {
        let mut first = task("first");
        first.status = Status::Done;
        let second = task("second");
        let mut third = task("third");
        third.status = Status::Done;
        let board = Board::from_tasks([first, second, third]).unwrap();

        let columns = board.columns();
        let done: Vec<_> = columns.get(Status::Done).iter().map(|t| t.name.as_str()).collect();
        assert_eq!(done, ["first", "third"]);
        assert_eq!(columns.get(Status::Todo).len(), 1);
        assert!(columns.get(Status::InProgress).is_empty());
    }
}
