//! Legacy file cleanup
//!
//! `.map` files are a leftover from the pre-Redux editor; the Workshop
//! pipeline ignores them, but they bloat uploads and confuse subscribers.

use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::utils::has_extension;

/// Find all legacy `.map` files in a mod tree, sorted
pub fn find_legacy_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<_> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.path().is_file() && has_extension(e.path(), "map"))
        .map(|e| e.path().to_path_buf())
        .collect();

    files.sort();
    files
}

/// Delete the given legacy files, best effort
///
/// Returns the number actually deleted; failures are logged and skipped.
pub fn delete_legacy_files(files: &[PathBuf]) -> usize {
    let mut count = 0;
    for path in files {
        match std::fs::remove_file(path) {
            Ok(()) => count += 1,
            Err(e) => warn!("error deleting {}: {e}", path.display()),
        }
    }
    count
}
