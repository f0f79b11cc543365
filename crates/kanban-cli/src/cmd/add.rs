//! `kb add`: create a task card with its initial subtasks.

use crate::cmd::Session;
use clap::Args;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Task name. Must be unique on the board.
    pub name: String,

    /// Category shown on the card.
    #[arg(short, long)]
    pub category: String,

    /// Priority: Alta, Média, Baixa (or high, medium, low).
    #[arg(short, long)]
    pub priority: String,

    /// Subtask labels separated by `;`, e.g. "Draft;Review".
    #[arg(short, long)]
    pub subtasks: String,
}

/// New tasks start in the first column with every subtask unchecked.
///
/// # Errors
///
/// Returns an error for a blank field, an unknown priority, a duplicate
/// name, or a failed save.
pub fn run_add(args: &AddArgs, session: &Session) -> anyhow::Result<()> {
    let mut board = session.open_board()?;
    let task = board.add_task(&args.name, &args.category, &args.priority, &args.subtasks)?;

    session.report(
        &task,
        &format!(
            "Added '{}' ({} subtasks) to {}",
            task.name,
            task.subtasks.len(),
            task.status
        ),
    )
}
