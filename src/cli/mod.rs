//! Command line interface for the embed frameworks script generator.
//!
//! This module provides argument parsing, command execution, and user
//! feedback for the `generate` and `plan` commands.

mod args;
pub mod commands;
mod output;

pub use args::{Args, Command, RuntimeConfig};
pub use commands::BuildContext;
pub use output::OutputManager;

use crate::error::{CliError, EmbedError, Result};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    args.validate()
        .map_err(|reason| EmbedError::Cli(CliError::InvalidArguments { reason }))?;

    let config = RuntimeConfig::from(&args);
    execute(&args.command, &config).await?;
    Ok(0)
}

/// Runs one parsed command.
pub async fn execute(command: &Command, config: &RuntimeConfig) -> Result<()> {
    match command {
        Command::Generate {
            manifest,
            platform,
            output,
        } => commands::generate(config, manifest, platform.clone(), output.as_deref()).await,
        Command::Plan {
            manifest,
            platform,
            configuration,
            archs,
            arch,
        } => {
            let build = BuildContext {
                configuration,
                archs,
                arch: arch.as_deref(),
            };
            commands::plan(config, manifest, platform.clone(), &build)
        }
    }
}

/// Prints `error` with its recovery suggestions.
pub fn report_error(error: &EmbedError) {
    let output = OutputManager::new(false, false);
    let _ = output.error(&error.to_string());
    for suggestion in error.recovery_suggestions() {
        let _ = output.indent(&suggestion);
    }
    if !error.is_recoverable() {
        let _ = output.indent("Nothing was written; fix the manifest and run again");
    }
}
