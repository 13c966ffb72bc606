//! Builder for constructing Settings.

use super::{ArtifactSpec, MultiSliceArtifact, Settings};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// Repeated calls for the same configuration append, keeping call order.
///
/// # Examples
///
/// ```
/// use kodegen_bundler_embed::embed::{ArtifactSpec, MultiSliceArtifact, SettingsBuilder, Slice};
///
/// # fn example() -> kodegen_bundler_embed::embed::Result<()> {
/// let settings = SettingsBuilder::new()
///     .sandbox_root("/Users/me/App/Pods")
///     .platform("ios")
///     .frameworks("Release", vec![ArtifactSpec::new("${BUILT_PRODUCTS_DIR}/A/A.framework")?])
///     .xcframeworks(
///         "Release",
///         vec![MultiSliceArtifact::new(
///             "/Users/me/App/Pods/B/B.xcframework",
///             vec![Slice::new("ios", "ios-arm64/B.framework", true)],
///         )?],
///     )
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    frameworks_by_config: HashMap<String, Vec<ArtifactSpec>>,
    xcframeworks_by_config: HashMap<String, Vec<MultiSliceArtifact>>,
    sandbox_root: Option<PathBuf>,
    platform: Option<String>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the sandbox root (`${PODS_ROOT}` at execution time).
    ///
    /// # Required
    pub fn sandbox_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.sandbox_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the target platform identifier.
    ///
    /// # Required
    pub fn platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    /// Appends frameworks for `config`.
    pub fn frameworks(mut self, config: impl Into<String>, frameworks: Vec<ArtifactSpec>) -> Self {
        self.frameworks_by_config
            .entry(config.into())
            .or_default()
            .extend(frameworks);
        self
    }

    /// Appends xcframeworks for `config`.
    pub fn xcframeworks(
        mut self,
        config: impl Into<String>,
        xcframeworks: Vec<MultiSliceArtifact>,
    ) -> Self {
        self.xcframeworks_by_config
            .entry(config.into())
            .or_default()
            .extend(xcframeworks);
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `sandbox_root` or `platform` was not set.
    pub fn build(self) -> crate::embed::Result<Settings> {
        use crate::embed::error::Context;

        Ok(Settings::new(
            self.frameworks_by_config,
            self.xcframeworks_by_config,
            self.sandbox_root.context("sandbox_root is required")?,
            self.platform.context("platform is required")?,
        ))
    }
}
