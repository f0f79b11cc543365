//! `kb check` / `kb uncheck`: tick a subtask and let the card follow.
//!
//! Subtasks are numbered from 1, as `kb show` prints them.

use crate::cmd::Session;
use clap::Args;
use clap::builder::RangedU64ValueParser;
use kanban_core::KanbanError;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Task name.
    pub task: String,

    /// Subtask number as shown by `kb show` (starting at 1).
    #[arg(value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub index: usize,
}

/// Set the subtask's state and re-derive the task's column.
///
/// # Errors
///
/// Returns an error for an unknown task, a subtask number past the end of
/// the list, or a failed save.
pub fn run_check(args: &CheckArgs, done: bool, session: &Session) -> anyhow::Result<()> {
    let mut board = session.open_board()?;

    let len = board.task(&args.task)?.subtasks.len();
    if args.index > len {
        return Err(KanbanError::SubtaskNotFound {
            task: args.task.clone(),
            index: args.index,
            len,
        }
        .into());
    }

    let status = board.toggle_subtask(&args.task, args.index - 1, done)?;
    let task = board.task(&args.task)?;
    let verb = if done { "Checked" } else { "Unchecked" };
    session.report(
        task,
        &format!(
            "{verb} '{}' on '{}' ({status})",
            task.subtasks[args.index - 1].label,
            task.name
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::testing::session;
    use clap::Parser;
    use kanban_core::Status;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: CheckArgs,
    }

    #[test]
    fn check_args_parse_one_based_index() {
        let w = Wrapper::parse_from(["test", "Tarefa Exemplo", "2"]);
        assert_eq!(w.args.task, "Tarefa Exemplo");
        assert_eq!(w.args.index, 2);
    }

    #[test]
    fn check_args_reject_zero() {
        assert!(Wrapper::try_parse_from(["test", "Tarefa Exemplo", "0"]).is_err());
    }

    #[test]
    fn checking_every_subtask_moves_card_to_done() {
        let dir = tempfile::tempdir().expect("tempdir");
        let session = session(&dir.path().join("board.csv"));
        for index in [1, 2] {
            let args = CheckArgs {
                task: "Tarefa Exemplo".into(),
                index,
            };
            run_check(&args, true, &session).expect("check");
        }

        let board = session.open_board().expect("reopen");
        assert_eq!(board.task("Tarefa Exemplo").expect("seed").status, Status::Done);
    }

    #[test]
    fn index_past_the_end_reports_one_based_number() {
        let dir = tempfile::tempdir().expect("tempdir");
        let session = session(&dir.path().join("board.csv"));
        let args = CheckArgs {
            task: "Tarefa Exemplo".into(),
            index: 3,
        };
        let err = run_check(&args, true, &session).expect_err("only two subtasks");
        let err = err.downcast_ref::<KanbanError>().expect("kanban error");
        assert!(matches!(
            err,
            KanbanError::SubtaskNotFound { index: 3, len: 2, .. }
        ));
    }
}
