//! Input model for script generation.
//!
//! Artifact descriptions handed over by dependency resolution, plus the
//! [`Settings`] aggregate and its builder.

mod arch;
mod artifact;
mod builder;
mod core;
mod xcframework;

pub use arch::Arch;
pub use artifact::ArtifactSpec;
pub use builder::SettingsBuilder;
pub use self::core::Settings;
pub use xcframework::{MultiSliceArtifact, Slice};
