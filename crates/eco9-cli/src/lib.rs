#![forbid(unsafe_code)]
//! `eco9` command line and the application state behind it.

mod commands;
mod config;
mod logging;
mod output;
mod state;

use std::path::PathBuf;
use std::process::ExitCode as ProcessExitCode;

use clap::{error::ErrorKind, ArgAction, Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Generator, Shell};
use eco9_core::ExitCode;

pub use config::{
    discover_config_path, AppConfig, ImpactConfig, LoadedConfig, LogConfig,
    ENV_ECO9_MULTIPLIERS, ENV_ECO9_NEGATIVE_VALUES, ENV_ECO9_SQLITE_PATH, ENV_ECO9_STORE_BACKEND,
};
pub use logging::{build_filter, init_tracing, LogFlags};
pub use state::{build_calculator, AppError, AppState};

use output::{emit_error, CliError, OutputMode};

pub const CRATE_NAME: &str = "eco9-cli";

const ECO9_HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
Usage: {usage}

Options:
{options}

Commands:
{subcommands}
{after-help}";

#[derive(Parser)]
#[command(name = "eco9", version)]
#[command(about = "Estimate CO2 saved and water conserved by sustainable activities")]
#[command(help_template = ECO9_HELP_TEMPLATE)]
#[command(
    after_help = "Environment:\n  ECO9_CONFIG          Config file path\n  ECO9_STORE_BACKEND   memory | sqlite\n  ECO9_SQLITE_PATH     SQLite database file\n  ECO9_MULTIPLIERS     Multiplier table file (JSON or TOML)\n  ECO9_LOG_LEVEL       Log verbosity override"
)]
struct Cli {
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[arg(long, global = true, default_value_t = false)]
    quiet: bool,
    #[arg(long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[arg(long, global = true, default_value_t = false)]
    trace: bool,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long = "print-config-paths", default_value_t = false)]
    print_config_paths: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate impact or inspect the multiplier table
    Impact {
        #[command(subcommand)]
        command: ImpactCommand,
    },
    /// Log and manage activities
    Activity {
        #[command(subcommand)]
        command: ActivityCommand,
    },
    /// Totals over logged activities
    Summary {
        #[arg(long)]
        user: Option<String>,
    },
    /// Print the effective configuration
    Config,
    /// Generate shell completions
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ImpactCommand {
    Calculate {
        #[command(flatten)]
        input: InputArgs,
        /// Validate the value before calculating
        #[arg(long, default_value_t = false)]
        checked: bool,
    },
    Table,
}

#[derive(Subcommand)]
enum ActivityCommand {
    Log {
        #[arg(long)]
        user: String,
        #[command(flatten)]
        input: InputArgs,
        #[arg(long)]
        note: Option<String>,
    },
    Show {
        #[arg(long)]
        id: u64,
    },
    Update {
        #[arg(long)]
        id: u64,
        #[command(flatten)]
        input: InputArgs,
        #[arg(long)]
        note: Option<String>,
    },
    Delete {
        #[arg(long)]
        id: u64,
    },
    List {
        #[arg(long)]
        user: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long, default_value_t = eco9_model::DEFAULT_PAGE_LIMIT)]
        limit: usize,
        #[arg(long)]
        cursor: Option<String>,
    },
}

#[derive(Args)]
struct InputArgs {
    #[arg(long)]
    category: String,
    #[arg(long, allow_negative_numbers = true)]
    value: f64,
    #[arg(long)]
    unit: String,
    #[arg(long)]
    subtype: Option<String>,
}

impl InputArgs {
    fn into_input(self) -> eco9_model::ActivityInput {
        let input = eco9_model::ActivityInput::new(self.category, self.value, &self.unit);
        match self.subtype.as_deref() {
            Some(subtype) => input.with_subtype(subtype),
            None => input,
        }
    }
}

pub fn main_entry() -> ProcessExitCode {
    let wants_json = std::env::args().any(|arg| arg == "--json");
    match run() {
        Ok(()) => ProcessExitCode::from(ExitCode::Success as u8),
        Err(err) => {
            tracing::debug!(code = %err.machine.code, exit = err.exit_code.as_str(), "command failed");
            emit_error(&err, wants_json);
            ProcessExitCode::from(err.exit_code as u8)
        }
    }
}

fn run() -> Result<(), CliError> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{err}");
                return Ok(());
            }
            _ => {
                let mut usage = CliError::usage("invalid command line arguments");
                usage.machine = usage.machine.with_detail("error", &err.to_string());
                return Err(usage);
            }
        },
    };
    let output_mode = OutputMode { json: cli.json };
    if cli.print_config_paths {
        return commands::config_paths(output_mode);
    }

    let command = cli
        .command
        .ok_or_else(|| CliError::usage("missing command; see --help"))?;
    if let Commands::Completion { shell } = command {
        print_completion(shell);
        return Ok(());
    }

    let loaded = AppConfig::load(cli.config.as_deref())?;
    let log_flags = LogFlags {
        quiet: cli.quiet,
        verbose: cli.verbose,
        trace: cli.trace,
    };
    init_tracing(log_flags, &loaded.config.log);

    match command {
        Commands::Impact { command } => match command {
            ImpactCommand::Calculate { input, checked } => {
                commands::impact_calculate(&loaded.config, input.into_input(), checked, output_mode)
            }
            ImpactCommand::Table => commands::impact_table(&loaded.config, output_mode),
        },
        Commands::Config => commands::show_config(&loaded, output_mode),
        Commands::Activity { command } => {
            let state = AppState::init(loaded.config)?;
            let result = run_activity(&state, command, output_mode);
            finish(state, result)
        }
        Commands::Summary { user } => {
            let state = AppState::init(loaded.config)?;
            let result = commands::summary(&state, user.as_deref(), output_mode);
            finish(state, result)
        }
        Commands::Completion { .. } => Ok(()),
    }
}

fn run_activity(
    state: &AppState,
    command: ActivityCommand,
    output_mode: OutputMode,
) -> Result<(), CliError> {
    match command {
        ActivityCommand::Log { user, input, note } => {
            commands::activity_log(state, &user, &input.into_input(), note, output_mode)
        }
        ActivityCommand::Show { id } => commands::activity_show(state, id, output_mode),
        ActivityCommand::Update { id, input, note } => {
            commands::activity_update(state, id, &input.into_input(), note, output_mode)
        }
        ActivityCommand::Delete { id } => commands::activity_delete(state, id, output_mode),
        ActivityCommand::List {
            user,
            category,
            limit,
            cursor,
        } => commands::activity_list(
            state,
            commands::ListArgs {
                user,
                category,
                limit,
                cursor,
            },
            output_mode,
        ),
    }
}

fn print_completion<G: Generator>(generator: G) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    generate(generator, &mut command, name, &mut std::io::stdout());
}

/// Shuts the state down even when the command failed; the command's error
/// takes precedence over a shutdown error.
fn finish(state: AppState, result: Result<(), CliError>) -> Result<(), CliError> {
    let closed = state.shutdown();
    result?;
    closed.map_err(CliError::from)
}
