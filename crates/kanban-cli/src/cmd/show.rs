//! `kb show`: display one card with numbered subtasks.

use crate::cmd::Session;
use crate::output::{TaskCard, render_item};
use clap::Args;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Task name.
    pub task: String,
}

/// # Errors
///
/// Returns an error if the task does not exist.
pub fn run_show(args: &ShowArgs, session: &Session) -> anyhow::Result<()> {
    let board = session.open_board()?;
    let task = board.task(&args.task)?;
    render_item(&TaskCard(task), session.output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::testing::session;
    use clap::Parser;
    use kanban_core::KanbanError;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: ShowArgs,
    }

    #[test]
    fn show_args_parse_name_with_spaces() {
        let w = Wrapper::parse_from(["test", "Tarefa Exemplo"]);
        assert_eq!(w.args.task, "Tarefa Exemplo");
    }

    #[test]
    fn show_unknown_task_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let session = session(&dir.path().join("board.csv"));
        let err = run_show(&ShowArgs { task: "Ghost".into() }, &session).expect_err("missing");
        assert!(matches!(
            err.downcast_ref::<KanbanError>(),
            Some(KanbanError::TaskNotFound { name }) if name == "Ghost"
        ));
    }
}
