//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap, with the
//! build-setting arguments of `plan` falling back to the environment
//! variables Xcode exports to script phases.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Embed frameworks build-phase script generator
#[derive(Parser, Debug)]
#[command(
    name = "kodegen_bundler_embed",
    version,
    about = "Embed frameworks build-phase script generator",
    long_about = "Generates the shell script an Xcode build phase runs to copy vendored frameworks,
xcframework slices, dSYMs and bcsymbolmaps into the application bundle.

Usage:
  kodegen_bundler_embed generate --manifest embed.toml --output 'Pods/Target Support Files/Pods-App/Pods-App-frameworks.sh'
  kodegen_bundler_embed generate --manifest embed.json > frameworks.sh
  kodegen_bundler_embed plan --manifest embed.toml --configuration Release --archs 'arm64 x86_64' --arch arm64

Exit code 0 = script written (or plan printed)."
)]
pub struct Args {
    /// Command to run
    #[command(subcommand)]
    pub command: Command,

    /// Print additional detail
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress status messages
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render the embed frameworks script
    Generate {
        /// Manifest describing resolved frameworks (TOML, or JSON by extension)
        #[arg(short, long, value_name = "FILE")]
        manifest: PathBuf,

        /// Target platform; overrides the manifest's `platform`
        #[arg(short, long, value_name = "PLATFORM")]
        platform: Option<String>,

        /// Write the script here with mode 0755 instead of printing it
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show what the script would do for one build
    Plan {
        /// Manifest describing resolved frameworks (TOML, or JSON by extension)
        #[arg(short, long, value_name = "FILE")]
        manifest: PathBuf,

        /// Target platform; overrides the manifest's `platform`
        #[arg(short, long, value_name = "PLATFORM")]
        platform: Option<String>,

        /// Active build configuration
        #[arg(short, long, env = "CONFIGURATION", value_name = "NAME")]
        configuration: String,

        /// Architectures being built, whitespace separated
        #[arg(long, env = "ARCHS", value_name = "LIST")]
        archs: String,

        /// Architecture token xcframework slices are matched against
        #[arg(long, env = "arch", value_name = "ARCH")]
        arch: Option<String>,
    },
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        match &self.command {
            Command::Generate { platform, .. } => validate_platform(platform.as_deref()),
            Command::Plan {
                platform,
                configuration,
                archs,
                ..
            } => {
                validate_platform(platform.as_deref())?;
                if configuration.is_empty() {
                    return Err("Configuration cannot be empty".to_string());
                }
                if archs.split_whitespace().next().is_none() {
                    return Err("ARCHS cannot be empty".to_string());
                }
                Ok(())
            }
        }
    }
}

fn validate_platform(platform: Option<&str>) -> Result<(), String> {
    match platform {
        Some("") => Err("Platform cannot be empty".to_string()),
        _ => Ok(()),
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self {
            output: super::OutputManager::new(args.verbose, args.quiet),
        }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Print verbose message if in verbose mode
    pub fn verbose_println(&self, message: &str) -> std::io::Result<()> {
        self.output.verbose(message)
    }

    /// Print warning message if not in quiet mode
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.output.warn(message)
    }

    /// Print success message if not in quiet mode
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }

    /// Print progress message
    pub fn progress(&self, message: &str) -> std::io::Result<()> {
        self.output.progress(message)
    }

    /// Print section header
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        self.output.section(title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_generate_with_output() {
        let args = Args::try_parse_from([
            "kodegen_bundler_embed",
            "generate",
            "--manifest",
            "embed.toml",
            "--output",
            "out.sh",
        ])
        .unwrap();
        match args.command {
            Command::Generate {
                manifest, output, ..
            } => {
                assert_eq!(manifest, PathBuf::from("embed.toml"));
                assert_eq!(output, Some(PathBuf::from("out.sh")));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn plan_rejects_blank_archs() {
        let args = Args::try_parse_from([
            "kodegen_bundler_embed",
            "plan",
            "--manifest",
            "embed.toml",
            "--configuration",
            "Debug",
            "--archs",
            "  ",
        ])
        .unwrap();
        assert_eq!(args.validate().unwrap_err(), "ARCHS cannot be empty");
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        let parsed = Args::try_parse_from([
            "kodegen_bundler_embed",
            "-v",
            "-q",
            "generate",
            "--manifest",
            "embed.toml",
        ]);
        assert!(parsed.is_err());
    }
}
