// crates/dataplan-gate-cli/src/main.rs
// ============================================================================
// Module: Data Plan Gate CLI Entry Point
// Description: Command dispatcher for compiling plans and filtering events.
// Purpose: Exercise the blocking engine against files from the command line.
// Dependencies: clap, dataplan-gate-config, dataplan-gate-core, serde_json, thiserror, tracing
// ============================================================================

//! ## Overview
//! `dataplan-gate` compiles a data plan and prints the resulting table, runs a
//! single event through the blocking pipeline, or answers an attribute-key
//! query. A dropped event exits with status 2 so scripts can tell it apart
//! from failures. Diagnostics go to stderr through `tracing`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use dataplan_gate_config::ConfigError;
use dataplan_gate_config::GateConfig;
use dataplan_gate_config::read_data_plan;
use dataplan_gate_core::DataPlanCompiler;
use dataplan_gate_core::DataPlanDocument;
use dataplan_gate_core::KitBlocker;
use dataplan_gate_core::RuntimeEvent;
use dataplan_gate_core::TracingLogger;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum size of an event JSON input.
const MAX_EVENT_BYTES: usize = 1024 * 1024;
/// Exit status reported when the pipeline drops the event.
const DROPPED_EXIT_STATUS: u8 = 2;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "dataplan-gate", version, disable_help_subcommand = true)]
struct Cli {
    /// Optional config file path (defaults to dataplan-gate.toml or env override).
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile a data plan and print the lookup table and policy as JSON.
    Compile(CompileCommand),
    /// Run one event through the blocking pipeline.
    Filter(FilterCommand),
    /// Report whether a user attribute key would be blocked.
    CheckAttribute(CheckAttributeCommand),
}

/// Data-plan source shared by every command.
#[derive(Args, Debug)]
struct PlanArgs {
    /// Data plan JSON file (defaults to `data_plan.path` from the config).
    #[arg(long, value_name = "FILE")]
    plan: Option<PathBuf>,
}

/// Configuration for the `compile` command.
#[derive(Args, Debug)]
struct CompileCommand {
    /// Data-plan source.
    #[command(flatten)]
    plan: PlanArgs,
}

/// Configuration for the `filter` command.
#[derive(Args, Debug)]
struct FilterCommand {
    /// Data-plan source.
    #[command(flatten)]
    plan: PlanArgs,
    /// Runtime event JSON file.
    #[arg(long, value_name = "FILE")]
    event: PathBuf,
}

/// Configuration for the `check-attribute` command.
#[derive(Args, Debug)]
struct CheckAttributeCommand {
    /// Data-plan source.
    #[command(flatten)]
    plan: PlanArgs,
    /// User attribute key to check.
    #[arg(value_name = "KEY")]
    key: String,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for user-facing error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::new(err.to_string())
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let config = GateConfig::load_or_default(cli.config.as_deref())
        .map_err(|err| CliError::new(format!("failed to load config: {err}")))?;
    init_logging(&config.logging.filter)?;

    match cli.command {
        Commands::Compile(command) => command_compile(&config, &command),
        Commands::Filter(command) => command_filter(&config, &command),
        Commands::CheckAttribute(command) => command_check_attribute(&config, &command),
    }
}

/// Installs the stderr subscriber; `RUST_LOG` takes precedence over the config.
fn init_logging(configured: &str) -> CliResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured))
        .map_err(|err| CliError::new(format!("invalid log filter: {err}")))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|err| CliError::new(format!("failed to initialise logging: {err}")))
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Compiles the data plan and prints it.
fn command_compile(config: &GateConfig, command: &CompileCommand) -> CliResult<ExitCode> {
    let document = load_plan(config, &command.plan)?;
    let plan = DataPlanCompiler::new(TracingLogger)
        .with_overrides(config.policy_overrides())
        .compile(document.as_ref());
    let rendered = serde_json::to_string_pretty(&plan)
        .map_err(|err| CliError::new(format!("failed to render compiled plan: {err}")))?;
    write_stdout_line(&rendered)?;
    Ok(ExitCode::SUCCESS)
}

/// Runs one event through the pipeline and prints the result.
fn command_filter(config: &GateConfig, command: &FilterCommand) -> CliResult<ExitCode> {
    let document = load_plan(config, &command.plan)?;
    let event = read_event(&command.event)?;
    let blocker = KitBlocker::with_overrides(document.as_ref(), config.policy_overrides());

    let Some(event) = blocker.create_blocked_event(event) else {
        write_stdout_line("event dropped: no matching data point")?;
        return Ok(ExitCode::from(DROPPED_EXIT_STATUS));
    };
    let rendered = serde_json::to_string_pretty(&event)
        .map_err(|err| CliError::new(format!("failed to render event: {err}")))?;
    write_stdout_line(&rendered)?;
    Ok(ExitCode::SUCCESS)
}

/// Prints whether an attribute key is blocked.
fn command_check_attribute(
    config: &GateConfig,
    command: &CheckAttributeCommand,
) -> CliResult<ExitCode> {
    let document = load_plan(config, &command.plan)?;
    let blocker = KitBlocker::with_overrides(document.as_ref(), config.policy_overrides());
    let verdict = if blocker.is_attribute_key_blocked(&command.key) { "blocked" } else { "allowed" };
    write_stdout_line(verdict)?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Loads the data plan named on the command line, or the configured one.
fn load_plan(config: &GateConfig, args: &PlanArgs) -> CliResult<Option<DataPlanDocument>> {
    let Some(path) = args.plan.as_deref() else {
        return Ok(config.load_data_plan()?);
    };
    debug!(path = %path.display(), "loading data plan");
    Ok(Some(read_data_plan(path, config.data_plan.max_bytes)?))
}

/// Reads and parses a runtime event file.
fn read_event(path: &Path) -> CliResult<RuntimeEvent> {
    let metadata = fs::metadata(path)
        .map_err(|err| CliError::new(format!("failed to read event {}: {err}", path.display())))?;
    if !usize::try_from(metadata.len()).is_ok_and(|len| len <= MAX_EVENT_BYTES) {
        return Err(CliError::new(format!("event file exceeds {MAX_EVENT_BYTES} bytes")));
    }
    let bytes = fs::read(path)
        .map_err(|err| CliError::new(format!("failed to read event {}: {err}", path.display())))?;
    serde_json::from_slice(&bytes)
        .map_err(|err| CliError::new(format!("invalid event {}: {err}", path.display())))
}

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> CliResult<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(&mut stdout, "{message}")
        .map_err(|err| CliError::new(format!("failed to write stdout: {err}")))
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Emits an error message and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
