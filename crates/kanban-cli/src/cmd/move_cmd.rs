//! `kb move`: put a card in a column regardless of its subtasks.
//!
//! The placement holds until the next `kb check`/`kb uncheck` on the same
//! task, which re-derives the column from the subtasks.

use crate::cmd::Session;
use clap::Args;
use kanban_core::Status;

#[derive(Args, Debug)]
pub struct MoveArgs {
    /// Task name.
    pub task: String,

    /// Target column: todo, doing, done (or the stored token).
    pub status: Status,
}

/// # Errors
///
/// Returns an error for an unknown task or a failed save.
pub fn run_move(args: &MoveArgs, session: &Session) -> anyhow::Result<()> {
    let mut board = session.open_board()?;
    board.move_task(&args.task, args.status)?;

    let task = board.task(&args.task)?;
    session.report(task, &format!("Moved '{}' to {}", task.name, task.status))
}
