//! kanban-core library.
//!
//! The board state manager behind the `kb` command: tasks in three
//! columns, checkable subtasks, the rule that derives a task's column from
//! its subtasks, manual moves that override it, and the CSV store the
//! board lives in.
//!
//! # Conventions
//!
//! - **Errors**: typed `thiserror` enums in the library, `anyhow::Result` for config loading.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `debug!`).

pub mod board;
pub mod codec;
pub mod config;
pub mod controller;
pub mod error;
pub mod lock;
pub mod model;
pub mod status;
pub mod store;

pub use board::{Board, Columns};
pub use controller::BoardController;
pub use error::{ErrorCode, KanbanError, ValidationError};
pub use model::{Priority, Status, Subtask, Task};
pub use store::{CsvStore, MemoryStore, Store, StoreError};
