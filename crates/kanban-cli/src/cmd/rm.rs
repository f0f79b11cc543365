//! `kb rm`: delete a task card.
//!
//! Asks for confirmation on an interactive terminal unless `--force` is
//! given. Piped invocations never prompt.

use crate::cmd::Session;
use crate::output::{render, render_success};
use clap::Args;
use serde::Serialize;
use std::io::{IsTerminal, Write};

#[derive(Args, Debug)]
pub struct RmArgs {
    /// Task name.
    pub task: String,

    /// Skip interactive confirmation prompt.
    #[arg(long, short)]
    pub force: bool,
}

#[derive(Debug, Serialize)]
struct RmOutput {
    removed: String,
    subtasks: usize,
}

fn confirm_remove(name: &str, subtasks: usize) -> anyhow::Result<bool> {
    if !std::io::stdin().is_terminal() || !std::io::stdout().is_terminal() {
        return Ok(true);
    }

    eprint!("Delete task '{name}' and its {subtasks} subtasks? [y/N] ");
    std::io::stderr().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    let answer = input.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// # Errors
///
/// Returns an error for an unknown task (the board file is not touched) or
/// a failed save.
pub fn run_rm(args: &RmArgs, session: &Session) -> anyhow::Result<()> {
    let mut board = session.open_board()?;
    let subtasks = board.task(&args.task)?.subtasks.len();

    if !args.force && !confirm_remove(&args.task, subtasks)? {
        if !session.quiet {
            render_success(session.output, "Nothing deleted")?;
        }
        return Ok(());
    }

    let removed = board.remove_task(&args.task)?;
    let result = RmOutput {
        removed: removed.name,
        subtasks: removed.subtasks.len(),
    };
    if session.quiet && !session.output.is_json() {
        return Ok(());
    }
    render(session.output, &result, |r, w| {
        writeln!(w, "✓ Removed '{}' ({} subtasks)", r.removed, r.subtasks)
    })
}
