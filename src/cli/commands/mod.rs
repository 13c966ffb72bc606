//! Command execution functions.
//!
//! Each subcommand loads the manifest into [`Settings`] and hands it to the
//! generator.

mod generate;
mod plan;

pub use generate::generate;
pub use plan::{BuildContext, plan};

use crate::embed::Settings;
use crate::error::Result;
use crate::manifest::load_manifest;
use std::path::Path;

/// Loads `manifest` and converts it, resolving on-disk paths next to the file.
pub(crate) fn load_settings(manifest: &Path, platform: Option<String>) -> Result<Settings> {
    let base_dir = manifest.parent().unwrap_or(Path::new(""));
    load_manifest(manifest)?.into_settings(platform, base_dir)
}
