//! Multi-slice `.xcframework` bundles.

use crate::embed::{Error, Result};
use std::path::{Path, PathBuf};

/// One platform/architecture variant inside an `.xcframework`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Slice {
    platform_identifier: String,
    library_path: PathBuf,
    dynamic: bool,
}

impl Slice {
    /// Creates a slice.
    ///
    /// `library_path` is the slice's framework (or library) location, either
    /// relative to the owning bundle's root or absolute.
    pub fn new(
        platform_identifier: impl Into<String>,
        library_path: impl Into<PathBuf>,
        dynamic: bool,
    ) -> Self {
        Self {
            platform_identifier: platform_identifier.into(),
            library_path: library_path.into(),
            dynamic,
        }
    }

    /// Platform symbolic name, e.g. `ios`, `osx`, `tvos`.
    pub fn platform_identifier(&self) -> &str {
        &self.platform_identifier
    }

    /// Slice framework or library path.
    pub fn library_path(&self) -> &Path {
        &self.library_path
    }

    /// Whether the slice links dynamically. Static slices are linked into the host
    /// binary and never embedded.
    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }
}

/// An `.xcframework` bundle and its slices.
///
/// # Examples
///
/// ```
/// use kodegen_bundler_embed::embed::{MultiSliceArtifact, Slice};
///
/// let xcframework = MultiSliceArtifact::new(
///     "Pods/Core/Core.xcframework",
///     vec![
///         Slice::new("ios", "ios-arm64/Core.framework", true),
///         Slice::new("ios", "ios-arm64_x86_64-simulator/Core.framework", true),
///     ],
/// )?;
/// assert_eq!(xcframework.slices().len(), 2);
/// # Ok::<(), kodegen_bundler_embed::embed::Error>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MultiSliceArtifact {
    root_path: PathBuf,
    slices: Vec<Slice>,
}

impl MultiSliceArtifact {
    /// Creates the bundle description.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidSpec`] when the root path is empty or no slices are given.
    pub fn new(root_path: impl Into<PathBuf>, slices: Vec<Slice>) -> Result<Self> {
        let root_path = root_path.into();
        if root_path.as_os_str().is_empty() {
            return Err(Error::InvalidSpec(
                "xcframework path must not be empty".to_string(),
            ));
        }
        if slices.is_empty() {
            return Err(Error::InvalidSpec(format!(
                "xcframework {} has no slices",
                root_path.display()
            )));
        }

        Ok(Self { root_path, slices })
    }

    /// Bundle root.
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Slices in declaration order.
    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    /// Bundle name without the `.xcframework` extension.
    pub fn name(&self) -> String {
        self.root_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
