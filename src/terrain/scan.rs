//! Terrain file defect detection
//!
//! Terrain (`.trn`) files are consumed by the game's map loader, which
//! requires uniform CRLF line endings and exactly one `[Size]` section.
//! Editors on other platforms routinely break both. Detection operates on
//! raw bytes; a byte the scanner cannot decode must not stop analysis.

use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::scan::{Issue, IssueKind};
use crate::utils::has_extension;

/// Find all `.trn` files in a mod tree, sorted
pub fn find_terrain_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<_> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.path().is_file() && has_extension(e.path(), "trn"))
        .map(|e| e.path().to_path_buf())
        .collect();

    files.sort();
    files
}

/// 1-based line of the first bare `\n` or bare `\r`, if any
///
/// A file is defective unless every line break is exactly `\r\n`.
#[must_use]
pub fn first_line_ending_defect(bytes: &[u8]) -> Option<usize> {
    let mut line = 1usize;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                if i == 0 || bytes[i - 1] != b'\r' {
                    return Some(line);
                }
                line += 1;
            }
            b'\r' => {
                if i + 1 >= bytes.len() || bytes[i + 1] != b'\n' {
                    return Some(line);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Line numbers (1-based) of second-and-later `[Size]` lines
///
/// A line counts when, trimmed of surrounding whitespace, it equals
/// `[Size]` case-insensitively.
#[must_use]
pub fn duplicate_size_lines(bytes: &[u8]) -> Vec<usize> {
    let text = String::from_utf8_lossy(bytes);
    text.lines()
        .enumerate()
        .filter(|(_, l)| l.trim().eq_ignore_ascii_case("[size]"))
        .map(|(idx, _)| idx + 1)
        .skip(1)
        .collect()
}

/// Scan every terrain file under `mod_root` for structural defects
///
/// Emits at most one `LineEndingDefect` and one `DuplicateSection` issue per
/// file, anchored at the first offending line. Unreadable files are logged
/// and skipped; the batch never aborts.
#[must_use]
pub fn scan_terrain(mod_root: &Path) -> Vec<Issue> {
    let mut issues = Vec::new();
    for path in find_terrain_files(mod_root) {
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("could not scan terrain file {}: {e}", path.display());
                continue;
            }
        };

        if let Some(line) = first_line_ending_defect(&bytes) {
            issues.push(Issue::at_line(
                &path,
                IssueKind::LineEndingDefect,
                "Inconsistent line endings (expected CRLF)",
                line,
            ));
        }

        let duplicates = duplicate_size_lines(&bytes);
        if let Some(&first) = duplicates.first() {
            issues.push(Issue::at_line(
                &path,
                IssueKind::DuplicateSection,
                format!("Duplicate [Size] section ({} extra)", duplicates.len()),
                first,
            ));
        }
    }
    issues
}
