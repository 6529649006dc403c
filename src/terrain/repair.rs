//! Terrain file repair
//!
//! Both fixers transform raw bytes: lines are classified through a lossy
//! decode but emitted verbatim, so a byte the decoder cannot represent is
//! never altered by a fix it is not part of. Rewrites go through a temp file
//! in the target directory so a failed write leaves the original intact.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::Result;
use crate::odf::strip_comment;
use crate::scan::{ScanPhase, ScanProgress, ScanProgressCallback};

/// Result of a batch repair operation
#[derive(Debug, Clone, Default)]
pub struct BatchFixResult {
    /// Number of files successfully rewritten
    pub success_count: usize,
    /// Number of files that could not be fixed
    pub fail_count: usize,
    /// Messages for each file processed
    pub results: Vec<String>,
}

/// Normalize every line break to CRLF
///
/// Collapses `\r\n` and lone `\r` to `\n`, then expands every break to
/// `\r\n`. Idempotent: running it twice produces the same bytes as once.
#[must_use]
pub fn normalize_line_endings(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len() + bytes.len() / 16);
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\r' => {
                out.extend_from_slice(b"\r\n");
                // swallow the \n of an existing CRLF pair
                i += if bytes.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
            }
            b'\n' => {
                out.extend_from_slice(b"\r\n");
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    out
}

/// Copy state for the duplicate-section fixer
#[derive(Clone, Copy, PartialEq, Eq)]
enum CopyState {
    /// Lines are kept
    Normal,
    /// Inside a duplicate `[Size]` block; lines are dropped
    Skipping,
}

/// Drop every `[Size]` block after the first
///
/// The first `[Size]` block is kept verbatim. A second-or-later `[Size]`
/// line enters skip mode; any other bracketed header line leaves it (and is
/// kept). Line endings and undecodable bytes of kept lines are preserved.
#[must_use]
pub fn remove_duplicate_size_sections(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut size_found = false;
    let mut state = CopyState::Normal;

    for raw in bytes.split_inclusive(|&b| b == b'\n') {
        let decoded = String::from_utf8_lossy(raw);
        let clean = strip_comment(&decoded);

        if clean.eq_ignore_ascii_case("[size]") {
            if size_found {
                state = CopyState::Skipping;
            } else {
                size_found = true;
                state = CopyState::Normal;
                out.extend_from_slice(raw);
            }
        } else if clean.starts_with('[') && clean.ends_with(']') {
            state = CopyState::Normal;
            out.extend_from_slice(raw);
        } else if state == CopyState::Normal {
            out.extend_from_slice(raw);
        }
    }
    out
}

/// Normalize line endings in each file
pub fn fix_line_endings(files: &[PathBuf]) -> BatchFixResult {
    fix_line_endings_with_progress(files, &|_| {})
}

/// Normalize line endings in each file, with progress callback
pub fn fix_line_endings_with_progress(
    files: &[PathBuf],
    progress: ScanProgressCallback,
) -> BatchFixResult {
    fix_batch(files, normalize_line_endings, progress)
}

/// Remove duplicate `[Size]` sections from each file
pub fn fix_duplicate_sections(files: &[PathBuf]) -> BatchFixResult {
    fix_duplicate_sections_with_progress(files, &|_| {})
}

/// Remove duplicate `[Size]` sections from each file, with progress callback
pub fn fix_duplicate_sections_with_progress(
    files: &[PathBuf],
    progress: ScanProgressCallback,
) -> BatchFixResult {
    fix_batch(files, remove_duplicate_size_sections, progress)
}

fn fix_batch(
    files: &[PathBuf],
    fix: fn(&[u8]) -> Vec<u8>,
    progress: ScanProgressCallback,
) -> BatchFixResult {
    let mut result = BatchFixResult::default();
    let total = files.len();

    for (idx, path) in files.iter().enumerate() {
        progress(&ScanProgress::with_file(
            ScanPhase::Fixing,
            idx + 1,
            total,
            path.to_string_lossy(),
        ));

        match rewrite_with(path, fix) {
            Ok(()) => {
                result.success_count += 1;
                result.results.push(format!("Fixed: {}", path.display()));
            }
            Err(e) => {
                warn!("could not fix {}: {e}", path.display());
                result.fail_count += 1;
                result.results.push(format!("Failed {}: {e}", path.display()));
            }
        }
    }

    progress(&ScanProgress::new(ScanPhase::Complete, total, total));
    result
}

fn rewrite_with(path: &Path, fix: fn(&[u8]) -> Vec<u8>) -> Result<()> {
    let bytes = std::fs::read(path)?;
    let fixed = fix(&bytes);

    // parent() is empty for a bare relative file name
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(&fixed)?;
    tmp.persist(path).map_err(|e| crate::error::Error::Io(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_mixed_endings() {
        assert_eq!(
            normalize_line_endings(b"a\nb\rc\r\nd"),
            b"a\r\nb\r\nc\r\nd".to_vec()
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs: [&[u8]; 5] = [
            b"",
            b"a\nb\rc\r\nd\n\r",
            b"\r\r\n\n",
            b"no breaks",
            b"bad\xffbytes\n",
        ];
        for input in inputs {
            let once = normalize_line_endings(input);
            let twice = normalize_line_endings(&once);
            assert_eq!(once, twice, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_normalize_preserves_non_break_bytes() {
        let fixed = normalize_line_endings(b"bad\xffbyte\n");
        assert_eq!(fixed, b"bad\xffbyte\r\n".to_vec());
    }

    #[test]
    fn test_duplicate_removed_keeps_first_block() {
        let src = b"\
[Size]\r\n\
width = 1280\r\n\
[Size]\r\n\
width = 9999\r\n\
[Water]\r\n\
level = 3\r\n";
        let fixed = remove_duplicate_size_sections(src);
        let text = String::from_utf8(fixed).unwrap();
        assert_eq!(text.matches("[Size]").count(), 1);
        assert!(text.contains("width = 1280"));
        assert!(!text.contains("9999"));
        // the later, different section and its content survive
        assert!(text.contains("[Water]\r\nlevel = 3"));
    }

    #[test]
    fn test_duplicate_fix_preserves_lines_after_next_header() {
        // two [Size] blocks separated by content; everything after the next
        // different header must come through untouched
        let src = b"[Size]\nw = 1\n[Trees]\ncount = 5\n[Size]\nw = 2\n[Rocks]\ncount = 9\n";
        let fixed = remove_duplicate_size_sections(src);
        let text = String::from_utf8(fixed).unwrap();
        assert_eq!(text, "[Size]\nw = 1\n[Trees]\ncount = 5\n[Rocks]\ncount = 9\n");
    }

    #[test]
    fn test_single_size_untouched() {
        let src = b"[Size]\r\nw = 1\r\n[Water]\r\n";
        assert_eq!(remove_duplicate_size_sections(src), src.to_vec());
    }

    #[test]
    fn test_commented_size_line_not_a_trigger() {
        let src = b"[Size]\nw = 1\n// [Size]\nx = 2\n";
        assert_eq!(remove_duplicate_size_sections(src), src.to_vec());
    }

    #[test]
    fn test_batch_counts_failures_and_continues() {
        let dir = tempfile::TempDir::new().unwrap();
        let good = dir.path().join("a.trn");
        std::fs::write(&good, b"x\ny\n").unwrap();
        let missing = dir.path().join("no_such.trn");

        let result = fix_line_endings(&[missing, good.clone()]);
        assert_eq!(result.success_count, 1);
        assert_eq!(result.fail_count, 1);
        assert_eq!(std::fs::read(&good).unwrap(), b"x\r\ny\r\n".to_vec());
    }

    #[test]
    fn test_fix_clears_scan_flags() {
        use crate::terrain::scan::{duplicate_size_lines, first_line_ending_defect};

        let src = b"[Size]\nw = 1\n[Size]\nw = 2\n";
        let fixed = normalize_line_endings(&remove_duplicate_size_sections(src));
        assert_eq!(first_line_ending_defect(&fixed), None);
        assert!(duplicate_size_lines(&fixed).is_empty());
    }
}
