#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use kanban_core::config;
use kanban_core::{ErrorCode, KanbanError};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use std::env;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "kb: a personal kanban board in a CSV file",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Output format (overrides `FORMAT` and the user config).
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Board file to use instead of the configured one.
    #[arg(long, global = true, value_name = "PATH")]
    store: Option<PathBuf>,

    /// Suppress non-essential output.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Read",
        about = "Show the board",
        long_about = "Show every task grouped into the three columns.",
        after_help = "EXAMPLES:\n    # Show the whole board\n    kb board\n\n    # Only the in-progress column\n    kb board --status doing\n\n    # Emit machine-readable output\n    kb board --json"
    )]
    Board(cmd::board::BoardArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show one task",
        long_about = "Show a task card with its numbered subtasks.",
        after_help = "EXAMPLES:\n    # Show a card\n    kb show \"Design doc\"\n\n    # Emit machine-readable output\n    kb show \"Design doc\" --json"
    )]
    Show(cmd::show::ShowArgs),

    #[command(
        next_help_heading = "Edit",
        about = "Create a task",
        long_about = "Create a task in the first column with all subtasks unchecked.",
        after_help = "EXAMPLES:\n    # Create a task with two subtasks\n    kb add \"Design doc\" -c Work -p high -s \"Draft;Review\"\n\n    # Use the stored priority token\n    kb add Férias -c Pessoal -p Baixa -s Reservar"
    )]
    Add(cmd::add::AddArgs),

    #[command(
        next_help_heading = "Edit",
        about = "Add a subtask",
        long_about = "Append an unchecked subtask. The task stays in its current column.",
        after_help = "EXAMPLES:\n    # Add a subtask\n    kb sub \"Design doc\" \"Publish\""
    )]
    Sub(cmd::sub::SubArgs),

    #[command(
        next_help_heading = "Edit",
        about = "Check a subtask",
        long_about = "Mark a subtask done and move the task to the column its subtasks imply.",
        after_help = "EXAMPLES:\n    # Check the first subtask\n    kb check \"Design doc\" 1"
    )]
    Check(cmd::check::CheckArgs),

    #[command(
        next_help_heading = "Edit",
        about = "Uncheck a subtask",
        long_about = "Mark a subtask not done and move the task to the column its subtasks imply.",
        after_help = "EXAMPLES:\n    # Uncheck the second subtask\n    kb uncheck \"Design doc\" 2"
    )]
    Uncheck(cmd::check::CheckArgs),

    #[command(
        next_help_heading = "Edit",
        about = "Move a task to a column",
        long_about = "Place a task in a column regardless of its subtasks. The next check or uncheck on the task recomputes its column.",
        after_help = "EXAMPLES:\n    # Start working on a task\n    kb move \"Design doc\" doing\n\n    # Use the stored column token\n    kb move \"Design doc\" \"CONCLUÍDO\""
    )]
    Move(cmd::move_cmd::MoveArgs),

    #[command(
        next_help_heading = "Edit",
        about = "Delete a task",
        long_about = "Delete a task and its subtasks. Prompts on a terminal unless --force is given.",
        after_help = "EXAMPLES:\n    # Delete after confirming\n    kb rm \"Design doc\"\n\n    # Delete without prompting\n    kb rm \"Design doc\" --force"
    )]
    Rm(cmd::rm::RmArgs),

    #[command(
        next_help_heading = "Shell",
        about = "Generate shell completions",
        long_about = "Print a completion script for the given shell to stdout.",
        after_help = "EXAMPLES:\n    # Bash\n    kb completions bash > ~/.local/share/bash-completion/completions/kb"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("KANBAN_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "kanban=debug,info"
        } else {
            "kanban=info,warn"
        })
    });

    let format = env::var("KANBAN_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Map a failed command onto the CLI error envelope.
fn to_cli_error(err: &anyhow::Error) -> CliError {
    if let Some(kanban) = err.downcast_ref::<KanbanError>() {
        return CliError::from(kanban);
    }
    CliError::new(format!("{err:#}"))
}

fn config_error(err: &anyhow::Error) -> CliError {
    let code = ErrorCode::ConfigParseError;
    CliError::with_details(
        format!("{err:#}"),
        code.hint().unwrap_or_else(|| code.message()),
        code.code(),
    )
}

fn exit_with(output: OutputMode, error: &CliError) -> ! {
    if render_error(output, error).is_err() {
        eprintln!("error: {}", error.message);
    }
    std::process::exit(1)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    if let Commands::Completions(ref args) = cli.command {
        return cmd::completions::run_completions(args.shell, &mut Cli::command());
    }

    let project_root = env::current_dir()?;
    let config = match config::resolve_config(&project_root, cli.store.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            let output = resolve_output_mode(cli.format, cli.json, None);
            exit_with(output, &config_error(&err));
        }
    };
    debug!(store = %config.store_path.display(), "resolved board file");

    let output = resolve_output_mode(cli.format, cli.json, config.user.output.as_deref());
    let session = cmd::Session {
        output,
        quiet: cli.quiet,
        config,
    };

    let command_result = match cli.command {
        Commands::Board(ref args) => cmd::board::run_board(args, &session),
        Commands::Show(ref args) => cmd::show::run_show(args, &session),
        Commands::Add(ref args) => cmd::add::run_add(args, &session),
        Commands::Sub(ref args) => cmd::sub::run_sub(args, &session),
        Commands::Check(ref args) => cmd::check::run_check(args, true, &session),
        Commands::Uncheck(ref args) => cmd::check::run_check(args, false, &session),
        Commands::Move(ref args) => cmd::move_cmd::run_move(args, &session),
        Commands::Rm(ref args) => cmd::rm::run_rm(args, &session),
        Commands::Completions(_) => Ok(()),
    };

    if let Err(err) = command_result {
        exit_with(output, &to_cli_error(&err));
    }
    Ok(())
}
