//! Embed frameworks script generator.
//!
//! Produces the shell script an Xcode build phase runs to copy vendored
//! frameworks, their dSYMs and bcsymbolmaps into the application bundle,
//! stripping architectures that are not being built and re-signing the result.
//!
//! # Overview
//!
//! 1. Describe the resolved artifacts with [`ArtifactSpec`] and
//!    [`MultiSliceArtifact`], grouped per configuration in [`Settings`]
//! 2. [`EmbedFrameworksScript::generate`] selects xcframework slices for the
//!    target platform, groups statements per configuration and renders the script
//! 3. [`GeneratedScript::save_as`] writes it with executable permissions
//!
//! # Example
//!
//! ```no_run
//! use kodegen_bundler_embed::embed::{ArtifactSpec, EmbedFrameworksScript, SettingsBuilder};
//!
//! # async fn example() -> kodegen_bundler_embed::embed::Result<()> {
//! let settings = SettingsBuilder::new()
//!     .sandbox_root("Pods")
//!     .platform("ios")
//!     .frameworks(
//!         "Debug",
//!         vec![ArtifactSpec::new("${BUILT_PRODUCTS_DIR}/Alamofire/Alamofire.framework")?],
//!     )
//!     .build()?;
//!
//! let script = EmbedFrameworksScript::new(&settings).generate()?;
//! script
//!     .save_as("Pods/Target Support Files/Pods-App/Pods-App-frameworks.sh")
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`settings`] - Artifact model and generation input
//! - [`script`] - Statement grouping, slice selection, rendering and writing
//! - [`runtime`] - What the rendered routines decide at execution time
//! - [`macho`] - Architecture and linkage inspection of binaries on disk
//! - [`error`] - Error types

pub mod error;
pub mod macho;
pub mod runtime;
pub mod script;
pub mod settings;
pub mod utils;

pub use error::{Error, Result};
pub use script::{
    ConfigGroups, EmbedFrameworksScript, GeneratedScript, Invocation, SCRIPT_MODE, select_slices,
};
pub use settings::{Arch, ArtifactSpec, MultiSliceArtifact, Settings, SettingsBuilder, Slice};
