//! Path utilities

use std::path::{Path, PathBuf};

/// Normalize path separators to forward slashes (for display and grouping)
pub fn normalize_path<P: AsRef<Path>>(path: P) -> String {
    path.as_ref().to_string_lossy().replace('\\', "/")
}

/// Get relative path and normalize separators
pub fn relative_path<P: AsRef<Path>, B: AsRef<Path>>(path: P, base: B) -> Option<String> {
    path.as_ref()
        .strip_prefix(base.as_ref())
        .ok()
        .map(normalize_path)
}

/// Expand `~` and environment variables in a user-supplied path
pub fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path() {
        assert_eq!(
            relative_path("/mods/demo/units/tank.odf", "/mods/demo"),
            Some("units/tank.odf".to_string())
        );
        assert_eq!(relative_path("/elsewhere/tank.odf", "/mods/demo"), None);
    }
}
