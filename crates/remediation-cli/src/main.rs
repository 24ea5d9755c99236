// crates/remediation-cli/src/main.rs
// ============================================================================
// Module: Remediation Gate CLI Entry Point
// Description: Command dispatcher for invocation, preview, and config checks.
// Purpose: Run the remediation pipeline from a shell or container entrypoint.
// Dependencies: clap, remediation-cli, remediation-config, serde_json, thiserror
// ============================================================================

//! ## Overview
//! `remediation-gate invoke` reads one alarm event (file or stdin) and writes
//! the `{statusCode, body}` invocation result to stdout. `resolve` previews
//! the action and gate decision for a metric offline. `config check` loads
//! and validates configuration and prints the effective settings.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use remediation_cli::PreviewRequest;
use remediation_cli::invoke;
use remediation_cli::preview;
use remediation_config::RemediationConfig;
use remediation_core::Confidence;
use remediation_core::DEFAULT_CONFIDENCE;
use remediation_core::OperatingMode;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use time::OffsetDateTime;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum accepted event size in bytes.
const MAX_EVENT_BYTES: usize = 1024 * 1024;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "remediation-gate", version, disable_help_subcommand = true)]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one alarm event through the pipeline.
    Invoke(InvokeCommand),
    /// Preview the action and gate decision for a metric offline.
    Resolve(ResolveCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Mode override accepted on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
#[value(rename_all = "SCREAMING_SNAKE_CASE")]
enum ModeArg {
    /// Observation only.
    DryRun,
    /// Execution permitted.
    Active,
}

impl From<ModeArg> for OperatingMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::DryRun => Self::DryRun,
            ModeArg::Active => Self::Active,
        }
    }
}

/// Arguments for `invoke`.
#[derive(Args, Debug)]
struct InvokeCommand {
    /// Event JSON file, or `-` for stdin.
    #[arg(long, value_name = "FILE")]
    event: String,
    /// Config file (overrides `REMEDIATION_GATE_CONFIG`).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Operating mode (overrides config and `MODE`).
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,
}

/// Arguments for `resolve`.
#[derive(Args, Debug)]
struct ResolveCommand {
    /// Metric name to resolve.
    #[arg(long)]
    metric: String,
    /// Alarm name used for the security overlay.
    #[arg(long, default_value = "offline-preview")]
    alarm_name: String,
    /// Assumed model confidence (0-10).
    #[arg(long, default_value_t = i64::from(DEFAULT_CONFIDENCE))]
    confidence: i64,
    /// Mode the gate is evaluated under.
    #[arg(long, value_enum, default_value = "DRY_RUN")]
    mode: ModeArg,
    /// Use the extended action catalog.
    #[arg(long)]
    extended: bool,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Load, validate, and print the effective configuration.
    Check {
        /// Config file (overrides `REMEDIATION_GATE_CONFIG`).
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper.
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
    match cli.command {
        Commands::Invoke(command) => command_invoke(&command),
        Commands::Resolve(command) => command_resolve(&command),
        Commands::Config {
            command,
        } => match command {
            ConfigCommand::Check {
                config,
            } => command_config_check(config.as_deref()),
        },
    }
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Executes the `invoke` command.
fn command_invoke(command: &InvokeCommand) -> CliResult<ExitCode> {
    let event = read_event(&command.event)?;
    let mut config = RemediationConfig::load(command.config.as_deref());
    if let (Ok(config), Some(mode)) = (config.as_mut(), command.mode) {
        config.mode = mode.into();
    }
    let result = invoke(config, &event, OffsetDateTime::now_utc());
    write_json(&result)?;
    Ok(if result.is_success() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Executes the `resolve` command.
fn command_resolve(command: &ResolveCommand) -> CliResult<ExitCode> {
    let request = PreviewRequest {
        metric_name: command.metric.clone(),
        alarm_name: command.alarm_name.clone(),
        confidence: Confidence::clamped(command.confidence),
        mode: command.mode.into(),
        extended: command.extended,
    };
    write_json(&preview(&request))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `config check` command.
fn command_config_check(path: Option<&Path>) -> CliResult<ExitCode> {
    let config = RemediationConfig::load(path)
        .map_err(|err| CliError::new(format!("config check failed: {err}")))?;
    write_json(&config)?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads and parses the event from a file or stdin under the size limit.
fn read_event(source: &str) -> CliResult<Value> {
    let reader: Box<dyn Read> = if source == "-" {
        Box::new(std::io::stdin())
    } else {
        let file = File::open(source)
            .map_err(|err| CliError::new(format!("failed to open event {source}: {err}")))?;
        Box::new(file)
    };
    let limit = u64::try_from(MAX_EVENT_BYTES)
        .map_err(|_| CliError::new("event size limit exceeds u64".to_string()))?;
    let mut bytes = Vec::new();
    reader
        .take(limit.saturating_add(1))
        .read_to_end(&mut bytes)
        .map_err(|err| CliError::new(format!("failed to read event: {err}")))?;
    if bytes.len() > MAX_EVENT_BYTES {
        return Err(CliError::new("event exceeds size limit".to_string()));
    }
    serde_json::from_slice(&bytes)
        .map_err(|err| CliError::new(format!("event is not valid json: {err}")))
}

/// Writes a value as pretty JSON to stdout.
fn write_json<T: Serialize>(value: &T) -> CliResult<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::new(format!("failed to render output: {err}")))?;
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{rendered}")
        .map_err(|err| CliError::new(format!("failed to write stdout: {err}")))
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let mut stderr = std::io::stderr();
    let _ = writeln!(&mut stderr, "{message}");
    ExitCode::FAILURE
}
