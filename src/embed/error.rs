//! Error types for script generation.

use std::{fmt::Display, io, path::PathBuf};

/// Result type alias for generation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while modelling, generating or persisting an embed script.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A model value was constructed with data that breaks its invariants.
    #[error("invalid artifact spec: {0}")]
    InvalidSpec(String),

    /// Generation input rejected before anything was emitted.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Filesystem failure with the step that failed.
    #[error("{context} {path}: {error}")]
    Fs {
        /// What was being done.
        context: &'static str,
        /// Path involved.
        path: PathBuf,
        /// Underlying error.
        error: io::Error,
    },

    /// Error wrapped with additional context.
    #[error("{0}: {1}")]
    Context(String, Box<Self>),

    /// Anything else (template rendering, binary parsing).
    #[error("{0}")]
    GenericError(String),
}

/// Attach context to a fallible value.
pub trait Context<T> {
    /// Wrap the error (or `None`) with a context message.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Wrap the error (or `None`) with a lazily built context message.
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T> Context<T> for Result<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::Context(context.to_string(), Box::new(e)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Error::Context(f().to_string(), Box::new(e)))
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

/// Filesystem context for `io::Result`.
pub trait ErrorExt<T> {
    /// Convert an I/O error into [`Error::Fs`] naming the step and path.
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.into(),
            error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_context_names_step_and_path() {
        let err: Result<()> = Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
            .fs_context("writing embed script", "/tmp/out.sh");
        let msg = err.unwrap_err().to_string();
        assert_eq!(msg, "writing embed script /tmp/out.sh: denied");
    }

    #[test]
    fn option_context_becomes_generic_error() {
        let missing: Option<u8> = None;
        let err = missing.context("platform is required").unwrap_err();
        assert!(matches!(err, Error::GenericError(ref m) if m == "platform is required"));
    }
}
