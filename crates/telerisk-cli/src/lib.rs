#![forbid(unsafe_code)]

mod command_output_adapters;
mod commands;
mod register_commands;

use clap::{error::ErrorKind, ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Generator, Shell};
use command_output_adapters::{emit_error, CliError};
use commands::{CriteriaArgs, HeaderPolicyCli, RegisterArgs};
use std::path::{Path, PathBuf};
use std::process::ExitCode as ProcessExitCode;
use telerisk_core::{resolve_config_path, ExitCode, LoadedConfig};
use telerisk_ingest::HeaderPolicy;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const TELERISK_HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
Usage: {usage}

Options:
{options}

Commands:
{subcommands}
{after-help}";

#[derive(Parser)]
#[command(name = "telerisk", version)]
#[command(about = "Risk register recommender for telecom delivery projects")]
#[command(help_template = TELERISK_HELP_TEMPLATE)]
struct Cli {
    /// Compact canonical JSON output and JSON errors on stderr.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[arg(long, global = true, default_value_t = false)]
    quiet: bool,
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,
    /// YAML configuration file; defaults to .telerisk/config.yaml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true, value_enum, default_value_t = HeaderPolicyCli::Exact)]
    header_policy: HeaderPolicyCli,
    /// Exit with a validation error when any register row is rejected.
    #[arg(long, global = true, default_value_t = false)]
    fail_on_row_errors: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up recommender tags matching the criteria.
    Recommend {
        #[command(flatten)]
        register: RegisterArgs,
        #[command(flatten)]
        criteria: CriteriaArgs,
    },
    /// Run the RMS assessment pipeline and print prioritised results.
    Assess {
        #[command(flatten)]
        register: RegisterArgs,
        #[command(flatten)]
        criteria: CriteriaArgs,
        #[arg(long)]
        top: Option<usize>,
    },
    /// Break the register down by sector with weighted overall risk.
    Sectors {
        #[command(flatten)]
        register: RegisterArgs,
    },
    /// Load the register and run the QA audit.
    Validate {
        #[command(flatten)]
        register: RegisterArgs,
    },
    /// Print the effective configuration and where it came from.
    PrintConfig,
    /// Print a shell completion script.
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Print the version.
    Version,
}

#[derive(Clone, Copy)]
struct LogFlags {
    quiet: bool,
    verbose: u8,
}

impl LogFlags {
    fn directive(self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Clone, Copy)]
pub(crate) struct OutputMode {
    pub(crate) json: bool,
}

pub(crate) struct RunContext {
    pub(crate) config: LoadedConfig,
    pub(crate) header_policy: HeaderPolicy,
    pub(crate) fail_on_row_errors: bool,
}

pub fn main_entry() -> ProcessExitCode {
    let wants_json = std::env::args().any(|arg| arg == "--json");
    match run() {
        Ok(()) => ProcessExitCode::from(ExitCode::Success as u8),
        Err(err) => {
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
                return Err(CliError::usage("invalid command line arguments").with_detail(
                    "error",
                    &err.to_string(),
                ));
            }
        },
    };
    let output_mode = OutputMode { json: cli.json };
    let log_flags = LogFlags {
        quiet: cli.quiet,
        verbose: cli.verbose,
    };
    init_tracing(log_flags);

    let command = cli
        .command
        .ok_or_else(|| CliError::usage("missing command; see --help"))?;
    let context =
        || run_context(cli.config.as_deref(), cli.header_policy, cli.fail_on_row_errors);

    match command {
        Commands::Completion { shell } => {
            print_completion(shell);
            Ok(())
        }
        Commands::Version => register_commands::print_version(log_flags.verbose > 0, output_mode)
            .map_err(CliError::internal),
        Commands::PrintConfig => {
            let config = load_config(cli.config.as_deref())?;
            register_commands::print_config(&config, output_mode).map_err(CliError::internal)
        }
        Commands::Recommend { register, criteria } => {
            let ctx = context()?;
            register_commands::run_recommend(&register, &criteria, &ctx, output_mode)
        }
        Commands::Assess {
            register,
            criteria,
            top,
        } => {
            let ctx = context()?;
            register_commands::run_assess(&register, &criteria, top, &ctx, output_mode)
        }
        Commands::Sectors { register } => {
            let ctx = context()?;
            register_commands::run_sectors(&register, &ctx, output_mode)
        }
        Commands::Validate { register } => {
            let ctx = context()?;
            register_commands::run_validate(&register, &ctx, output_mode)
        }
    }
}

fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig, CliError> {
    let workdir = std::env::current_dir()
        .map_err(|e| CliError::input(format!("failed to resolve working directory: {e}")))?;
    Ok(LoadedConfig::load(resolve_config_path(explicit, &workdir))?)
}

fn run_context(
    config: Option<&Path>,
    header_policy: HeaderPolicyCli,
    fail_on_row_errors: bool,
) -> Result<RunContext, CliError> {
    Ok(RunContext {
        config: load_config(config)?,
        header_policy: header_policy.into(),
        fail_on_row_errors,
    })
}

// Filter comes from flags only; the environment is never consulted.
fn init_tracing(log_flags: LogFlags) {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(log_flags.directive()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

fn print_completion<G: Generator>(generator: G) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    generate(generator, &mut command, name, &mut std::io::stdout());
}
