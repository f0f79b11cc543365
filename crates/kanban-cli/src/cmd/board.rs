//! `kb board`: render the three columns.

use crate::cmd::Session;
use crate::output::{render_mode, write_board_pretty, write_column_pretty, write_task_row};
use clap::Args;
use kanban_core::{Status, Task};

#[derive(Args, Debug)]
pub struct BoardArgs {
    /// Show a single column (todo, doing, done or the stored token).
    #[arg(long, short)]
    pub status: Option<Status>,
}

/// Columns are listed in display order; cards keep their board order.
///
/// # Errors
///
/// Returns an error if the board file cannot be locked or read.
pub fn run_board(args: &BoardArgs, session: &Session) -> anyhow::Result<()> {
    let board = session.open_board()?;
    let columns = board.columns();

    match args.status {
        None => render_mode(
            session.output,
            &columns,
            |cols, w| {
                for status in Status::ALL {
                    for task in cols.get(status) {
                        write_task_row(w, task)?;
                    }
                }
                Ok(())
            },
            |cols, w| write_board_pretty(w, cols),
        ),
        Some(status) => {
            let tasks: Vec<&Task> = columns.get(status).to_vec();
            render_mode(
                session.output,
                &tasks,
                |tasks, w| {
                    for task in tasks {
                        write_task_row(w, task)?;
                    }
                    Ok(())
                },
                |tasks, w| write_column_pretty(w, status, tasks),
            )
        }
    }
}
