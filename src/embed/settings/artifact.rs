//! Framework artifact and its companion files.

use crate::embed::{Error, Result};

/// One vendored framework to embed, plus its debug companions.
///
/// Constructed once by whatever resolved the dependency graph and consumed by a
/// single generation pass. The source path may reference build variables such as
/// `${BUILT_PRODUCTS_DIR}`; it is emitted verbatim.
///
/// # Examples
///
/// ```
/// use kodegen_bundler_embed::embed::ArtifactSpec;
///
/// let spec = ArtifactSpec::new("${PODS_ROOT}/Vendored/Vendored.framework")?
///     .with_dsym_path("${PODS_ROOT}/Vendored/Vendored.framework.dSYM")
///     .with_bcsymbolmap_paths(vec!["${PODS_ROOT}/Vendored/A.bcsymbolmap".into()]);
///
/// assert!(spec.dsym_path().is_some());
/// # Ok::<(), kodegen_bundler_embed::embed::Error>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ArtifactSpec {
    source_path: String,
    dsym_path: Option<String>,
    bcsymbolmap_paths: Vec<String>,
}

impl ArtifactSpec {
    /// Creates a spec for the framework at `source_path`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidSpec`] if the path is empty.
    pub fn new(source_path: impl Into<String>) -> Result<Self> {
        let source_path = source_path.into();
        if source_path.is_empty() {
            return Err(Error::InvalidSpec(
                "framework source path must not be empty".to_string(),
            ));
        }

        Ok(Self {
            source_path,
            dsym_path: None,
            bcsymbolmap_paths: Vec::new(),
        })
    }

    /// Sets the companion `.dSYM` bundle. An empty path means "no dSYM".
    pub fn with_dsym_path(mut self, dsym_path: impl Into<String>) -> Self {
        let dsym_path = dsym_path.into();
        self.dsym_path = (!dsym_path.is_empty()).then_some(dsym_path);
        self
    }

    /// Sets the `.bcsymbolmap` files, in the order they should be installed.
    pub fn with_bcsymbolmap_paths(mut self, paths: Vec<String>) -> Self {
        self.bcsymbolmap_paths = paths;
        self
    }

    /// Framework location at build time.
    pub fn source_path(&self) -> &str {
        &self.source_path
    }

    /// Companion dSYM bundle, if any.
    pub fn dsym_path(&self) -> Option<&str> {
        self.dsym_path.as_deref()
    }

    /// Companion bcsymbolmap files.
    pub fn bcsymbolmap_paths(&self) -> &[String] {
        &self.bcsymbolmap_paths
    }
}
