//! Cross-platform path utilities for script paths

use std::path::{Component, Path, PathBuf};

/// Normalize path for cross-platform compatibility
///
/// Converts backslashes to forward slashes and drops `.` components, so
/// `./scripts\\cam.ors` and `scripts/cam.ors` compare equal. `..` is kept
/// as written; no filesystem access is made.
pub fn normalize_path<P: AsRef<Path>>(path: P) -> PathBuf {
    let path_str = path.as_ref().to_string_lossy().replace('\\', "/");

    let normalized: PathBuf = Path::new(&path_str)
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect();

    if normalized.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        normalized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_unix() {
        let normalized = normalize_path("/home/user/file.ors");
        assert_eq!(normalized.to_string_lossy(), "/home/user/file.ors");
    }

    #[test]
    fn test_normalize_path_windows_backslashes() {
        let normalized = normalize_path("scripts\\camera\\orbit.ors");
        assert_eq!(normalized.to_string_lossy(), "scripts/camera/orbit.ors");
    }

    #[test]
    fn test_normalize_path_drops_current_dir() {
        assert_eq!(normalize_path("./test.ors"), normalize_path("test.ors"));
        assert_eq!(
            normalize_path("scripts/./cam.ors").to_string_lossy(),
            "scripts/cam.ors"
        );
    }

    #[test]
    fn test_normalize_path_keeps_parent_components() {
        assert_eq!(
            normalize_path("../shared/cam.ors").to_string_lossy(),
            "../shared/cam.ors"
        );
    }

    #[test]
    fn test_normalize_path_mixed() {
        let normalized = normalize_path("some/path\\with\\mixed/separators");
        assert_eq!(
            normalized.to_string_lossy(),
            "some/path/with/mixed/separators"
        );
    }
}
