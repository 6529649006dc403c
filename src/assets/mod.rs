//! Cross-file asset reference checking
//!
//! The game engine resolves assets by bare file name, ignoring directory
//! structure, so the index here is a flat case-insensitive set of every file
//! name in the mod tree. References are pulled out of description and
//! material files with the same patterns the engine's loader recognizes.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::debug;
use walkdir::WalkDir;

use crate::odf::strip_slash_comment;
use crate::scan::{Issue, IssueKind};
use crate::utils::{has_extension, read_lossy};

/// Build a case-insensitive index of every file name in the tree
///
/// Directory structure is ignored: base-name collisions across
/// subdirectories intentionally satisfy any reference with that name.
pub fn index_file_names(root: &Path) -> HashSet<String> {
    WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.path().is_file())
        .map(|e| e.file_name().to_string_lossy().to_lowercase())
        .collect()
}

/// Report every asset reference that does not resolve to an indexed file
///
/// Scans `.odf` files for `geometryName`/`cockpitName`/`turretName`
/// assignments and `.material` files for `texture` directives. Files that
/// cannot be read are skipped silently; referential-integrity scanning is
/// best-effort and never aborts the run.
#[must_use]
pub fn check_asset_references(mod_root: &Path) -> Vec<Issue> {
    let index = index_file_names(mod_root);

    let odf_re = Regex::new(r#"(?i)(geometryName|cockpitName|turretName)\s*=\s*"([^"]+)""#)
        .expect("valid pattern");
    let texture_re = Regex::new(r"(?i)texture\s+(\S+)").expect("valid pattern");

    let mut files: Vec<PathBuf> = WalkDir::new(mod_root)
        .follow_links(true)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| {
            e.path().is_file()
                && (has_extension(e.path(), "odf") || has_extension(e.path(), "material"))
        })
        .map(|e| e.path().to_path_buf())
        .collect();
    files.sort();

    let mut issues = Vec::new();
    for path in files {
        let Ok(source) = read_lossy(&path) else {
            debug!("skipping unreadable file {}", path.display());
            continue;
        };

        let is_odf = has_extension(&path, "odf");
        for (idx, raw) in source.lines().enumerate() {
            let line = strip_slash_comment(raw);

            if is_odf {
                if let Some(caps) = odf_re.captures(line) {
                    let asset = caps[2].to_lowercase();
                    if !asset.is_empty() && !index.contains(&asset) {
                        issues.push(Issue::at_line(
                            &path,
                            IssueKind::MissingAsset,
                            format!("Missing {}: {asset}", &caps[1]),
                            idx + 1,
                        ));
                    }
                }
            } else if let Some(caps) = texture_re.captures(line) {
                let asset = caps[1].to_lowercase();
                if !index.contains(&asset) {
                    issues.push(Issue::at_line(
                        &path,
                        IssueKind::MissingAsset,
                        format!("Missing texture: {asset}"),
                        idx + 1,
                    ));
                }
            }
        }
    }
    issues
}
