use super::load_settings;
use crate::cli::RuntimeConfig;
use crate::embed::EmbedFrameworksScript;
use crate::error::Result;
use std::path::Path;

/// Renders the script for `manifest`, writing it to `output` or stdout.
pub async fn generate(
    config: &RuntimeConfig,
    manifest: &Path,
    platform: Option<String>,
    output: Option<&Path>,
) -> Result<()> {
    config.progress(&format!("Reading {}", manifest.display()))?;
    let settings = load_settings(manifest, platform)?;

    config.verbose_println(&format!(
        "Platform {}, configurations: {}",
        settings.platform(),
        settings.configurations().join(", ")
    ))?;

    let script = EmbedFrameworksScript::new(&settings).generate()?;

    match output {
        Some(path) => {
            script.save_as(path).await?;
            config.success(&format!("Wrote {}", path.display()))?;
        }
        None => config.output().result(script.contents())?,
    }

    Ok(())
}
