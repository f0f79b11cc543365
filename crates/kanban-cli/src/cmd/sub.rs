//! `kb sub`: append a subtask to an existing card.

use crate::cmd::Session;
use clap::Args;

#[derive(Args, Debug)]
pub struct SubArgs {
    /// Task name.
    pub task: String,

    /// Label of the new subtask (no `;` or `:`).
    pub label: String,
}

/// The card keeps its column: a finished task stays finished until one of
/// its subtasks is toggled.
///
/// # Errors
///
/// Returns an error for a blank or delimiter-bearing label, an unknown
/// task, or a failed save.
pub fn run_sub(args: &SubArgs, session: &Session) -> anyhow::Result<()> {
    let mut board = session.open_board()?;
    board.add_subtask(&args.task, &args.label)?;

    let task = board.task(&args.task)?;
    session.report(
        task,
        &format!(
            "Added subtask #{} '{}' to '{}'",
            task.subtasks.len(),
            args.label.trim(),
            task.name
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::testing::session;
    use clap::Parser;
    use kanban_core::{KanbanError, Status};

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: SubArgs,
    }

    #[test]
    fn sub_args_parse_positionals() {
        let w = Wrapper::parse_from(["test", "Tarefa Exemplo", "Sub3"]);
        assert_eq!(w.args.task, "Tarefa Exemplo");
        assert_eq!(w.args.label, "Sub3");
    }

    #[test]
    fn sub_appends_unchecked_and_keeps_column() {
        let dir = tempfile::tempdir().expect("tempdir");
        let session = session(&dir.path().join("board.csv"));
        let args = SubArgs {
            task: "Tarefa Exemplo".into(),
            label: "Sub3".into(),
        };
        run_sub(&args, &session).expect("sub");

        let board = session.open_board().expect("reopen");
        let task = board.task("Tarefa Exemplo").expect("seed");
        assert_eq!(task.status, Status::Todo);
        assert_eq!(task.progress(), (0, 3));
        assert_eq!(task.subtasks[2].label, "Sub3");
    }

    #[test]
    fn sub_rejects_reserved_delimiter() {
        let dir = tempfile::tempdir().expect("tempdir");
        let session = session(&dir.path().join("board.csv"));
        let args = SubArgs {
            task: "Tarefa Exemplo".into(),
            label: "a:b".into(),
        };
        let err = run_sub(&args, &session).expect_err("colon");
        assert!(err.downcast_ref::<KanbanError>().is_some_and(KanbanError::is_validation));
    }
}
