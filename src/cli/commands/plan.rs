//! Dry run of the generated script for one build.

use super::load_settings;
use crate::cli::RuntimeConfig;
use crate::embed::runtime::{StripOutcome, missing_slice_warning, plan_strip, select_runtime_slice};
use crate::embed::script::SANDBOX_ROOT_VARIABLE;
use crate::embed::{EmbedFrameworksScript, Invocation, macho};
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Build settings `plan` evaluates the script against.
#[derive(Debug, Clone)]
pub struct BuildContext<'a> {
    /// `$CONFIGURATION`
    pub configuration: &'a str,
    /// `$ARCHS`
    pub archs: &'a str,
    /// `$arch`; the first `$ARCHS` entry when unset.
    pub arch: Option<&'a str>,
}

/// Prints each statement of the active configuration and what it would do.
pub fn plan(
    config: &RuntimeConfig,
    manifest: &Path,
    platform: Option<String>,
    build: &BuildContext<'_>,
) -> Result<()> {
    let settings = load_settings(manifest, platform)?;
    let groups = EmbedFrameworksScript::new(&settings).invocations()?;

    let statements = groups.statements(build.configuration);
    if statements.is_empty() {
        config.warn(&format!(
            "Nothing is embedded for configuration {}",
            build.configuration
        ))?;
        return Ok(());
    }

    let arch = build
        .arch
        .or_else(|| build.archs.split_whitespace().next())
        .unwrap_or_default();
    let sandbox_dir = manifest
        .parent()
        .unwrap_or(Path::new(""))
        .join(settings.sandbox_root());

    let mut lines = Vec::new();
    for statement in statements {
        lines.push(statement.to_string());
        match statement {
            Invocation::InstallFramework(path) => {
                lines.push(strip_line(path, &sandbox_dir, build.archs));
            }
            Invocation::InstallXcframework { root, slices } => {
                match select_runtime_slice(slices.as_slice(), arch) {
                    Some(slice) => {
                        lines.push(format!("  slice: {slice}"));
                        let slice_path = format!("{root}/{slice}");
                        lines.push(strip_line(&slice_path, &sandbox_dir, build.archs));
                    }
                    None => {
                        let warning = missing_slice_warning(slices.as_slice(), build.archs);
                        lines.push(format!("  {warning}"));
                    }
                }
            }
            Invocation::InstallDsym(_) | Invocation::InstallBcsymbolmap(_) => {}
        }
    }

    config.section(&format!(
        "Configuration {} (ARCHS={}, arch={})",
        build.configuration, build.archs, arch
    ))?;
    let mut text = lines.join("\n");
    text.push('\n');
    config.output().result(&text)?;
    Ok(())
}

/// Describes what `strip_invalid_archs` would do to the framework at `path`.
fn strip_line(path: &str, sandbox_dir: &Path, build_archs: &str) -> String {
    let Some(binary) = framework_binary(path, sandbox_dir) else {
        return "  binary: unresolved build variable, not inspected".to_string();
    };
    if !binary.exists() {
        return format!("  binary: {} not found, not inspected", binary.display());
    }

    let archs = match macho::binary_archs(&binary) {
        Ok(archs) => archs,
        Err(e) => {
            log::warn!("Could not inspect {}: {}", binary.display(), e);
            return format!("  binary: {} unreadable, not inspected", binary.display());
        }
    };
    let archs: Vec<&str> = archs.iter().map(|arch| arch.as_str()).collect();

    match plan_strip(&binary.display().to_string(), &archs, build_archs) {
        StripOutcome::Stripped { removed } => format!("  strip: {}", removed.join(" ")),
        StripOutcome::NotStripped { warning: Some(warning) } => format!("  {warning}"),
        StripOutcome::NotStripped { warning: None } => "  strip: nothing to remove".to_string(),
    }
}

/// Binary inside the framework at `path`, with `${PODS_ROOT}` resolved.
///
/// `None` when another build variable remains, since only Xcode knows its value.
fn framework_binary(path: &str, sandbox_dir: &Path) -> Option<PathBuf> {
    let resolved = match path.strip_prefix(SANDBOX_ROOT_VARIABLE) {
        Some(rest) => sandbox_dir.join(rest.trim_start_matches('/')),
        None => PathBuf::from(path),
    };
    let text = resolved.to_string_lossy();
    if text.contains("${") || text.contains("$(") {
        return None;
    }

    match (resolved.extension(), resolved.file_stem()) {
        (Some(ext), Some(stem)) if ext == "framework" => Some(resolved.join(stem)),
        _ => Some(resolved),
    }
}
