//! Lexical path helpers.
//!
//! Nothing here touches the filesystem: paths in generation input may point at
//! locations that only exist on the machine running the build.

use std::path::{Component, Path, PathBuf};

/// Expresses `path` relative to `base`, purely lexically.
///
/// Both paths are cleaned first (`.` dropped, `dir/..` collapsed), then:
/// - `path` under `base`: the remainder (`.` when equal).
/// - Both absolute or both relative: walks up with `..` from the common prefix.
/// - One absolute and one relative: `path` unchanged, since no relation can be
///   derived without a working directory.
pub fn relative_path(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() != base.is_absolute() {
        return path.to_path_buf();
    }

    let path_parts = clean_components(path);
    let base_parts = clean_components(base);

    let common = path_parts
        .iter()
        .zip(&base_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base_parts.len() {
        relative.push("..");
    }
    for part in &path_parts[common..] {
        relative.push(part.as_os_str());
    }

    if relative.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        relative
    }
}

/// Components with `.` removed and each `name/..` pair collapsed.
///
/// `..` directly under the root is dropped; leading `..` of a relative path
/// is kept.
fn clean_components(path: &Path) -> Vec<Component<'_>> {
    let mut cleaned: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match cleaned.last() {
                Some(Component::Normal(_)) => {
                    cleaned.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => cleaned.push(component),
            },
            _ => cleaned.push(component),
        }
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_of_base() {
        assert_eq!(
            relative_path(Path::new("/p/Pods/A/A.xcframework"), Path::new("/p/Pods")),
            PathBuf::from("A/A.xcframework")
        );
    }

    #[test]
    fn sibling_walks_up() {
        assert_eq!(
            relative_path(Path::new("/p/Vendor/B.xcframework"), Path::new("/p/Pods")),
            PathBuf::from("../Vendor/B.xcframework")
        );
        assert_eq!(
            relative_path(Path::new("Vendor/B.xcframework"), Path::new("Pods")),
            PathBuf::from("../Vendor/B.xcframework")
        );
    }

    #[test]
    fn parent_segments_are_collapsed_before_comparing() {
        assert_eq!(
            relative_path(Path::new("/p/Pods/C/C.xcframework"), Path::new("/p/App/../Pods")),
            PathBuf::from("C/C.xcframework")
        );
        assert_eq!(
            relative_path(Path::new("/p/Pods/./X/../C/C.xcframework"), Path::new("/p/Pods")),
            PathBuf::from("C/C.xcframework")
        );
        assert_eq!(
            relative_path(Path::new("/../p/Vendor/B.xcframework"), Path::new("/p/Pods/")),
            PathBuf::from("../Vendor/B.xcframework")
        );
    }

    #[test]
    fn leading_parent_of_relative_path_is_kept() {
        assert_eq!(
            relative_path(Path::new("../Vendor/B.xcframework"), Path::new("Pods")),
            PathBuf::from("../../Vendor/B.xcframework")
        );
    }

    #[test]
    fn mixed_kinds_are_left_alone() {
        assert_eq!(
            relative_path(Path::new("Vendor/B.xcframework"), Path::new("/p/Pods")),
            PathBuf::from("Vendor/B.xcframework")
        );
    }

    #[test]
    fn equal_paths_give_dot() {
        assert_eq!(relative_path(Path::new("/p"), Path::new("/p")), PathBuf::from("."));
        assert_eq!(relative_path(Path::new("./p"), Path::new("p")), PathBuf::from("."));
    }
}
