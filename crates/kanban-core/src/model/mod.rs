//! Board data model: tasks, subtasks, and the enums persisted with them.

pub mod task;

pub use task::{ParseEnumError, Priority, Status, StatusSource, Subtask, Task};
