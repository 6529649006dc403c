//! Filesystem helpers shared by the scanners

use std::path::Path;

/// Read a text file with lossy UTF-8 decoding
///
/// Mod description files are nominally UTF-8 but frequently contain stray
/// bytes from legacy editors. A corrupt byte must not stop analysis of the
/// rest of the file, so malformed sequences are replaced rather than
/// rejected.
pub fn read_lossy(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Check whether a path has the given extension, case-insensitively
pub fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}
