//! Embed frameworks build-phase script generator
//!
//! This library produces the shell script an Xcode "Embed Frameworks" build
//! phase runs for a dependency-managed target:
//! - copying frameworks and selected xcframework slices into the bundle
//! - installing dSYMs and bcsymbolmaps
//! - stripping architectures that are not being built, then code signing
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod embed;
pub mod error;
pub mod manifest;

// Re-export commonly used types
pub use error::{CliError, EmbedError, Result};
