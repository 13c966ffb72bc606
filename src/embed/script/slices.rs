//! Generation-time slice selection for xcframeworks.
//!
//! Narrows an xcframework to the dynamic slices of the target platform. The
//! final per-architecture pick happens when the script runs (see
//! [`crate::embed::runtime::select_runtime_slice`]), by substring match on the
//! paths returned here, so their order is significant.

use crate::embed::{MultiSliceArtifact, utils::path::relative_path};
use std::path::PathBuf;

/// Dynamic slices of `xcframework` built for `platform`, relative to its root.
///
/// Platform matching is exact. Static slices are dropped because they are
/// linked into the host binary. An empty result means the xcframework
/// contributes nothing for this platform; it is not an error.
pub fn select_slices(xcframework: &MultiSliceArtifact, platform: &str) -> Vec<PathBuf> {
    let root = xcframework.root_path();

    xcframework
        .slices()
        .iter()
        .filter(|slice| slice.platform_identifier() == platform)
        .filter(|slice| slice.is_dynamic())
        .map(|slice| relative_path(&root.join(slice.library_path()), root))
        .collect()
}
