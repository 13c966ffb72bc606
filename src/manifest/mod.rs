//! Generation input read from a TOML or JSON manifest.
//!
//! The manifest is what the dependency resolver hands over: resolved
//! frameworks and xcframeworks per configuration.
//!
//! ```toml
//! sandbox_root = "Pods"
//! platform = "ios"
//!
//! [[frameworks.Debug]]
//! source_path = "${BUILT_PRODUCTS_DIR}/Alamofire/Alamofire.framework"
//!
//! [[frameworks.Release]]
//! source_path = "${PODS_ROOT}/Vendored/Vendored.framework"
//! dsym_path = "${PODS_ROOT}/Vendored/Vendored.framework.dSYM"
//! bcsymbolmap_paths = ["${PODS_ROOT}/Vendored/A1B2.bcsymbolmap"]
//!
//! [[xcframeworks.Release]]
//! path = "Pods/Core/Core.xcframework"
//! slices = [
//!     { platform = "ios", path = "ios-arm64/Core.framework", dynamic = true },
//!     { platform = "ios", path = "ios-arm64_x86_64-simulator/Core.framework" },
//! ]
//! ```
//!
//! A slice without `dynamic` is inspected on disk (relative to the manifest's
//! directory) for its linkage.

use crate::embed::{self, ArtifactSpec, MultiSliceArtifact, Settings, SettingsBuilder, Slice};
use crate::error::{CliError, EmbedError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Raw manifest document.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmbedManifest {
    /// Directory `${PODS_ROOT}` refers to at build time.
    pub sandbox_root: PathBuf,

    /// Target platform identifier (`ios`, `osx`, `tvos`, `watchos`, `visionos`).
    #[serde(default)]
    pub platform: Option<String>,

    /// Frameworks per configuration.
    #[serde(default)]
    pub frameworks: HashMap<String, Vec<FrameworkEntry>>,

    /// xcframeworks per configuration.
    #[serde(default)]
    pub xcframeworks: HashMap<String, Vec<XcframeworkEntry>>,
}

/// One framework with its debug companions.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FrameworkEntry {
    /// Framework location, build variables allowed.
    pub source_path: String,

    /// Companion dSYM bundle.
    #[serde(default)]
    pub dsym_path: Option<String>,

    /// Companion bcsymbolmap files.
    #[serde(default)]
    pub bcsymbolmap_paths: Vec<String>,
}

/// One xcframework.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct XcframeworkEntry {
    /// Bundle location.
    pub path: PathBuf,

    /// Slices in match order.
    pub slices: Vec<SliceEntry>,
}

/// One xcframework slice.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SliceEntry {
    /// Platform symbolic name.
    pub platform: String,

    /// Slice framework path, relative to the xcframework or absolute.
    pub path: PathBuf,

    /// Linkage; read from the binary when omitted.
    #[serde(default)]
    pub dynamic: Option<bool>,
}

/// Reads and parses the manifest at `path`.
///
/// `.json` files are parsed as JSON, anything else as TOML.
pub fn load_manifest(path: &Path) -> Result<EmbedManifest> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        EmbedError::Cli(CliError::ExecutionFailed {
            command: "read_manifest".to_string(),
            reason: format!("Failed to read {}: {}", path.display(), e),
        })
    })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let manifest = if is_json {
        serde_json::from_str(&contents)?
    } else {
        toml::from_str(&contents)?
    };

    log::debug!("Loaded manifest {}", path.display());
    Ok(manifest)
}

impl EmbedManifest {
    /// Converts the manifest into generation [`Settings`].
    ///
    /// `platform` overrides the manifest's own value. `base_dir` anchors relative
    /// paths when a slice's linkage must be read from disk.
    pub fn into_settings(self, platform: Option<String>, base_dir: &Path) -> Result<Settings> {
        let platform = platform.or(self.platform).ok_or_else(|| {
            EmbedError::Cli(CliError::MissingArgument {
                argument: "platform".to_string(),
            })
        })?;

        let mut builder = SettingsBuilder::new()
            .sandbox_root(&self.sandbox_root)
            .platform(platform);

        for (config, entries) in self.frameworks {
            let frameworks = entries
                .into_iter()
                .map(FrameworkEntry::into_spec)
                .collect::<embed::Result<Vec<_>>>()?;
            builder = builder.frameworks(config, frameworks);
        }

        for (config, entries) in self.xcframeworks {
            let xcframeworks = entries
                .into_iter()
                .map(|entry| entry.into_artifact(base_dir))
                .collect::<embed::Result<Vec<_>>>()?;
            builder = builder.xcframeworks(config, xcframeworks);
        }

        Ok(builder.build()?)
    }
}

impl FrameworkEntry {
    fn into_spec(self) -> embed::Result<ArtifactSpec> {
        let mut spec =
            ArtifactSpec::new(self.source_path)?.with_bcsymbolmap_paths(self.bcsymbolmap_paths);
        if let Some(dsym) = self.dsym_path {
            spec = spec.with_dsym_path(dsym);
        }
        Ok(spec)
    }
}

impl XcframeworkEntry {
    fn into_artifact(self, base_dir: &Path) -> embed::Result<MultiSliceArtifact> {
        let root = self.path;
        let slices = self
            .slices
            .into_iter()
            .map(|slice| -> embed::Result<Slice> {
                let dynamic = match slice.dynamic {
                    Some(dynamic) => dynamic,
                    None => detect_linkage(&base_dir.join(&root).join(&slice.path))?,
                };
                Ok(Slice::new(slice.platform, slice.path, dynamic))
            })
            .collect::<embed::Result<Vec<_>>>()?;

        MultiSliceArtifact::new(root, slices)
    }
}

/// Reads the linkage of a slice from its binary.
///
/// `Foo.framework` resolves to `Foo.framework/Foo`; any other path is taken as
/// the library file itself.
fn detect_linkage(slice_path: &Path) -> embed::Result<bool> {
    use embed::error::Context;

    let binary = match slice_path.extension() {
        Some(ext) if ext == "framework" => {
            let stem = slice_path
                .file_stem()
                .context("framework path has no name")?;
            slice_path.join(stem)
        }
        _ => slice_path.to_path_buf(),
    };

    let dynamic = embed::macho::is_dynamic_library(&binary)
        .with_context(|| format!("probing linkage of {}", slice_path.display()))?;
    log::debug!(
        "{} links {}",
        binary.display(),
        if dynamic { "dynamically" } else { "statically" }
    );
    Ok(dynamic)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
sandbox_root = "Pods"
platform = "ios"

[[frameworks.Release]]
source_path = "${PODS_ROOT}/Vendored/Vendored.framework"
dsym_path = "${PODS_ROOT}/Vendored/Vendored.framework.dSYM"
bcsymbolmap_paths = ["a.bcsymbolmap", "b.bcsymbolmap"]

[[xcframeworks.Debug]]
path = "Pods/Core/Core.xcframework"
slices = [
    { platform = "ios", path = "ios-arm64/Core.framework", dynamic = true },
    { platform = "ios", path = "ios-arm64/libCore.a", dynamic = false },
]
"#;

    #[test]
    fn parses_toml_manifest() {
        let manifest: EmbedManifest = toml::from_str(MANIFEST).unwrap();
        assert_eq!(manifest.platform.as_deref(), Some("ios"));
        assert_eq!(manifest.frameworks["Release"][0].bcsymbolmap_paths.len(), 2);
        assert_eq!(manifest.xcframeworks["Debug"][0].slices.len(), 2);
    }

    #[test]
    fn converts_into_settings() {
        let manifest: EmbedManifest = toml::from_str(MANIFEST).unwrap();
        let settings = manifest.into_settings(None, Path::new(".")).unwrap();

        assert_eq!(settings.platform(), "ios");
        assert_eq!(settings.sandbox_root(), Path::new("Pods"));
        let release = &settings.frameworks_by_config()["Release"][0];
        assert_eq!(release.dsym_path(), Some("${PODS_ROOT}/Vendored/Vendored.framework.dSYM"));
        let debug = &settings.xcframeworks_by_config()["Debug"][0];
        assert!(!debug.slices()[1].is_dynamic());
    }

    #[test]
    fn platform_argument_overrides_manifest() {
        let manifest: EmbedManifest = toml::from_str(MANIFEST).unwrap();
        let settings = manifest
            .into_settings(Some("tvos".to_string()), Path::new("."))
            .unwrap();
        assert_eq!(settings.platform(), "tvos");
    }

    #[test]
    fn missing_platform_is_reported() {
        let manifest: EmbedManifest = toml::from_str("sandbox_root = \"Pods\"").unwrap();
        let err = manifest.into_settings(None, Path::new(".")).unwrap_err();
        assert!(matches!(
            err,
            EmbedError::Cli(CliError::MissingArgument { ref argument }) if argument == "platform"
        ));
    }

    #[test]
    fn empty_source_path_is_rejected() {
        let manifest: EmbedManifest = toml::from_str(
            "sandbox_root = \"Pods\"\nplatform = \"ios\"\n[[frameworks.Debug]]\nsource_path = \"\"\n",
        )
        .unwrap();
        let err = manifest.into_settings(None, Path::new(".")).unwrap_err();
        assert!(matches!(err, EmbedError::Embed(embed::Error::InvalidSpec(_))));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let parsed: std::result::Result<EmbedManifest, _> =
            toml::from_str("sandbox_root = \"Pods\"\nplatfrom = \"ios\"\n");
        assert!(parsed.is_err());
    }

    #[test]
    fn missing_slice_binary_fails_linkage_detection() {
        let dir = tempfile::tempdir().unwrap();
        let manifest: EmbedManifest = toml::from_str(
            r#"
sandbox_root = "Pods"
platform = "ios"
[[xcframeworks.Debug]]
path = "Pods/Core/Core.xcframework"
slices = [{ platform = "ios", path = "ios-arm64/Core.framework" }]
"#,
        )
        .unwrap();
        let err = manifest.into_settings(None, dir.path()).unwrap_err();
        assert!(err.to_string().contains("probing linkage"));
    }
}
