//! Execution-time decisions of the generated script, modelled in Rust.
//!
//! These functions replay what `install_xcframework` and `strip_invalid_archs`
//! decide when Xcode runs the script, with the same stringly comparisons. They
//! let the generation-time selection ([`crate::embed::select_slices`]) be
//! checked against the runtime one and back the `plan` command.

use std::collections::BTreeSet;

/// Slice `install_xcframework` would install: the first path containing `arch`.
///
/// `arch` is Xcode's opaque `$arch` token. The match is a plain substring test,
/// so `arm64` also matches an `arm64e` or `arm64_32` slice listed first.
pub fn select_runtime_slice<'p, S: AsRef<str>>(paths: &'p [S], arch: &str) -> Option<&'p str> {
    paths
        .iter()
        .map(AsRef::as_ref)
        .find(|path| path.contains(arch))
}

/// Warning `install_xcframework` prints when no slice matches.
pub fn missing_slice_warning<S: AsRef<str>>(paths: &[S], build_archs: &str) -> String {
    let joined: Vec<&str> = paths.iter().map(AsRef::as_ref).collect();
    format!(
        "warning: [CP] Unable to find matching .xcframework slice in '{}' for the current build architectures ({}).",
        joined.join(" "),
        build_archs
    )
}

/// Result of `strip_invalid_archs` on one binary.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StripOutcome {
    /// Architectures removed in place; `STRIP_BINARY_RETVAL=1`.
    Stripped {
        /// Removed architectures in binary order.
        removed: Vec<String>,
    },
    /// Binary left untouched; `STRIP_BINARY_RETVAL=0`.
    NotStripped {
        /// Warning printed when none of the binary's architectures is being built.
        warning: Option<String>,
    },
}

impl StripOutcome {
    /// Whether the binary was modified.
    pub fn is_stripped(&self) -> bool {
        matches!(self, StripOutcome::Stripped { .. })
    }
}

/// Decides what `strip_invalid_archs` does to `binary`.
///
/// `build_archs` is the whitespace separated `$ARCHS` value. An empty
/// intersection (computed as sets) leaves the binary alone with a warning.
/// Otherwise each binary architecture that does not occur in `$ARCHS` (as a
/// substring, like the script's `*"$arch"*` test) is removed.
pub fn plan_strip<S: AsRef<str>>(binary: &str, binary_archs: &[S], build_archs: &str) -> StripOutcome {
    let requested: BTreeSet<&str> = build_archs.split_whitespace().collect();
    let present: BTreeSet<&str> = binary_archs.iter().map(AsRef::as_ref).collect();

    if requested.intersection(&present).next().is_none() {
        let listed: Vec<&str> = binary_archs.iter().map(AsRef::as_ref).collect();
        return StripOutcome::NotStripped {
            warning: Some(format!(
                "warning: [CP] Vendored binary '{}' contains architectures ({}) none of which match the current build architectures ({}).",
                binary,
                listed.join(" "),
                build_archs
            )),
        };
    }

    let removed: Vec<String> = binary_archs
        .iter()
        .map(AsRef::as_ref)
        .filter(|arch| !build_archs.contains(arch))
        .map(str::to_string)
        .collect();

    if removed.is_empty() {
        StripOutcome::NotStripped { warning: None }
    } else {
        StripOutcome::Stripped { removed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_architectures_not_being_built() {
        let outcome = plan_strip("B", &["arm64", "x86_64"], "arm64");
        assert_eq!(
            outcome,
            StripOutcome::Stripped {
                removed: vec!["x86_64".to_string()]
            }
        );
        assert!(outcome.is_stripped());
    }

    #[test]
    fn disjoint_architectures_warn_and_leave_binary() {
        let outcome = plan_strip("/tmp/B", &["armv7"], "arm64");
        assert_eq!(
            outcome,
            StripOutcome::NotStripped {
                warning: Some(
                    "warning: [CP] Vendored binary '/tmp/B' contains architectures (armv7) none of which match the current build architectures (arm64)."
                        .to_string()
                )
            }
        );
    }

    #[test]
    fn exact_match_is_not_stripped() {
        let outcome = plan_strip("B", &["arm64"], "arm64 x86_64");
        assert_eq!(outcome, StripOutcome::NotStripped { warning: None });
    }

    #[test]
    fn intersection_ignores_order() {
        let outcome = plan_strip("B", &["x86_64", "arm64", "i386"], "x86_64 arm64");
        assert_eq!(
            outcome,
            StripOutcome::Stripped {
                removed: vec!["i386".to_string()]
            }
        );
    }

    #[test]
    fn removal_uses_substring_test_like_the_script() {
        // `arm64` occurs inside `arm64e`, so the script keeps the arm64 slice.
        let outcome = plan_strip("B", &["arm64", "arm64e", "x86_64"], "arm64e");
        assert_eq!(
            outcome,
            StripOutcome::Stripped {
                removed: vec!["x86_64".to_string()]
            }
        );
    }

    #[test]
    fn runtime_pick_is_first_substring_match() {
        let paths = ["ios-arm64_x86_64-simulator/C.framework", "ios-arm64/C.framework"];
        assert_eq!(
            select_runtime_slice(&paths, "arm64"),
            Some("ios-arm64_x86_64-simulator/C.framework")
        );
        assert_eq!(
            select_runtime_slice(&paths, "x86_64"),
            Some("ios-arm64_x86_64-simulator/C.framework")
        );
        assert_eq!(select_runtime_slice(&paths, "armv7"), None);
    }

    #[test]
    fn missing_slice_warning_lists_candidates() {
        let warning = missing_slice_warning(&["a/C.framework", "b/C.framework"], "armv7");
        assert_eq!(
            warning,
            "warning: [CP] Unable to find matching .xcframework slice in 'a/C.framework b/C.framework' for the current build architectures (armv7)."
        );
    }
}
