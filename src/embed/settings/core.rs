//! Core Settings struct and implementations.

use super::{ArtifactSpec, MultiSliceArtifact};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Input of one generation pass.
///
/// Holds the resolved artifacts per build configuration, the sandbox root that
/// `${PODS_ROOT}` stands for at execution time, and the platform the target is
/// built for. Constructed via [`SettingsBuilder`].
///
/// The per-configuration maps are unordered on purpose: emitted configuration
/// order comes from sorting, never from insertion.
///
/// # Examples
///
/// ```
/// use kodegen_bundler_embed::embed::{ArtifactSpec, SettingsBuilder};
///
/// # fn example() -> kodegen_bundler_embed::embed::Result<()> {
/// let settings = SettingsBuilder::new()
///     .sandbox_root("Pods")
///     .platform("ios")
///     .frameworks("Debug", vec![ArtifactSpec::new("${BUILT_PRODUCTS_DIR}/A/A.framework")?])
///     .build()?;
/// assert_eq!(settings.platform(), "ios");
/// # Ok(())
/// # }
/// ```
///
/// # See Also
///
/// - [`SettingsBuilder`] - Builder for constructing Settings
///
/// [`SettingsBuilder`]: super::SettingsBuilder
#[derive(Clone, Debug)]
pub struct Settings {
    /// Frameworks (with dSYMs and bcsymbolmaps) per configuration.
    frameworks_by_config: HashMap<String, Vec<ArtifactSpec>>,

    /// xcframeworks per configuration.
    xcframeworks_by_config: HashMap<String, Vec<MultiSliceArtifact>>,

    /// Sandbox root, emitted as `${PODS_ROOT}`.
    sandbox_root: PathBuf,

    /// Platform symbolic name slices are matched against.
    platform: String,
}

impl Settings {
    pub(crate) fn new(
        frameworks_by_config: HashMap<String, Vec<ArtifactSpec>>,
        xcframeworks_by_config: HashMap<String, Vec<MultiSliceArtifact>>,
        sandbox_root: PathBuf,
        platform: String,
    ) -> Self {
        Self {
            frameworks_by_config,
            xcframeworks_by_config,
            sandbox_root,
            platform,
        }
    }

    /// Frameworks keyed by configuration name.
    pub fn frameworks_by_config(&self) -> &HashMap<String, Vec<ArtifactSpec>> {
        &self.frameworks_by_config
    }

    /// xcframeworks keyed by configuration name.
    pub fn xcframeworks_by_config(&self) -> &HashMap<String, Vec<MultiSliceArtifact>> {
        &self.xcframeworks_by_config
    }

    /// Sandbox root used for relative xcframework paths.
    pub fn sandbox_root(&self) -> &Path {
        &self.sandbox_root
    }

    /// Target platform identifier.
    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// Every configuration name mentioned by either map, sorted.
    pub fn configurations(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .frameworks_by_config
            .keys()
            .chain(self.xcframeworks_by_config.keys())
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}
