pub mod add;
pub mod board;
pub mod check;
pub mod completions;
pub mod move_cmd;
pub mod rm;
pub mod show;
pub mod sub;

use crate::output::{self, OutputMode, render_success};
use kanban_core::config::EffectiveConfig;
use kanban_core::{BoardController, CsvStore, KanbanError, Task};
use std::io::{self, Write};
use tracing::debug;

/// Per-invocation state shared by every command handler.
#[derive(Debug)]
pub struct Session {
    pub output: OutputMode,
    pub quiet: bool,
    pub config: EffectiveConfig,
}

impl Session {
    /// Lock and load the configured board file.
    ///
    /// In pretty mode the whole board is re-rendered after every committed
    /// mutation, the same way the card view refreshes after each event.
    pub fn open_board(&self) -> anyhow::Result<BoardController<CsvStore>> {
        let timeout = self.config.project.store.lock_timeout();
        let store = CsvStore::open(self.config.store_path.clone(), timeout)
            .map_err(KanbanError::from)?;
        let mut controller = BoardController::open(store)?;

        if self.output.is_pretty() && !self.quiet {
            controller.on_change(|board| {
                let stdout = io::stdout();
                let mut out = stdout.lock();
                if let Err(err) = output::write_board_pretty(&mut out, &board.columns())
                    .and_then(|()| writeln!(out))
                {
                    debug!(error = %err, "board re-render failed");
                }
            });
        }
        Ok(controller)
    }

    /// Report a mutated task: JSON object, text row, or a check-mark line.
    pub fn report(&self, task: &Task, message: &str) -> anyhow::Result<()> {
        match self.output {
            OutputMode::Json => output::render(self.output, task, |_, _| Ok(())),
            OutputMode::Text if !self.quiet => {
                let stdout = io::stdout();
                let mut out = stdout.lock();
                output::write_task_row(&mut out, task)?;
                Ok(())
            }
            OutputMode::Pretty if !self.quiet => render_success(self.output, message),
            OutputMode::Text | OutputMode::Pretty => Ok(()),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Session;
    use crate::output::OutputMode;
    use kanban_core::config::{EffectiveConfig, ProjectConfig, UserConfig};
    use std::path::Path;

    /// Session writing to `store` with output muted.
    pub fn session(store: &Path) -> Session {
        Session {
            output: OutputMode::Text,
            quiet: true,
            config: EffectiveConfig {
                project: ProjectConfig::default(),
                user: UserConfig::default(),
                store_path: store.to_path_buf(),
            },
        }
    }
}
