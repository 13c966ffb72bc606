//! Error types for the command line tool.
//!
//! This module defines all error types with actionable error messages and recovery suggestions.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, EmbedError>;

/// Main error type for all CLI operations
#[derive(Error, Debug)]
pub enum EmbedError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON manifest errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML manifest errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Generation errors
    #[error("Embed error: {0}")]
    Embed(#[from] crate::embed::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Missing required argument
    #[error("Missing required argument: {argument}")]
    MissingArgument {
        /// Argument name
        argument: String,
    },

    /// Command execution failed
    #[error("Command execution failed: {command} - {reason}")]
    ExecutionFailed {
        /// Command that failed
        command: String,
        /// Reason for the error
        reason: String,
    },
}

impl EmbedError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            EmbedError::Embed(crate::embed::Error::InvalidInput(_))
            | EmbedError::Embed(crate::embed::Error::InvalidSpec(_)) => vec![
                "Check that every configuration name and framework path in the manifest is non-empty"
                    .to_string(),
            ],
            EmbedError::Embed(crate::embed::Error::Fs { path, .. }) => vec![format!(
                "Check that {} is writable",
                path.display()
            )],
            EmbedError::Toml(_) | EmbedError::Json(_) => {
                vec!["Check the manifest syntax against tests/fixtures/embed.toml".to_string()]
            }
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }

    /// Check if this error is recoverable
    ///
    /// Write failures can be retried against another location; rejected input
    /// needs the manifest fixed first.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            EmbedError::Embed(crate::embed::Error::InvalidInput(_))
                | EmbedError::Embed(crate::embed::Error::InvalidSpec(_))
        )
    }
}
