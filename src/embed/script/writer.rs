//! Persisting a generated script.

use super::GeneratedScript;
use crate::embed::error::{ErrorExt, Result};
use std::path::Path;

/// Writes `script` to `path` and applies its permission bits.
///
/// Parent directories are created as needed. A failure in either the write or
/// the permission step is returned as [`crate::embed::Error::Fs`]; the script
/// value itself stays valid and can be written elsewhere.
pub async fn write_script(script: &GeneratedScript, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .fs_context("creating script directory", parent)?;
    }

    tokio::fs::write(path, script.contents().as_bytes())
        .await
        .fs_context("writing embed frameworks script", path)?;

    set_mode(path, script.mode()).await?;

    log::info!("Wrote embed frameworks script to {}", path.display());
    Ok(())
}

#[cfg(unix)]
async fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
        .await
        .fs_context("marking script executable", path)
}

#[cfg(not(unix))]
async fn set_mode(path: &Path, _mode: u32) -> Result<()> {
    log::debug!(
        "Skipping permission bits for {} on a non-unix host",
        path.display()
    );
    Ok(())
}
