//! ODF description validation against the schema

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::scan::{Issue, IssueKind};
use crate::utils::{has_extension, read_lossy};

use super::parser::{OdfEvent, OdfParser};
use super::schema::OdfSchema;

/// Find all `.odf` files in a mod tree, sorted
pub fn find_description_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<_> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.path().is_file() && has_extension(e.path(), "odf"))
        .map(|e| e.path().to_path_buf())
        .collect();

    files.sort();
    files
}

/// Validate every ODF file under `mod_root` against `schema`
///
/// A disabled schema (empty allowed-header list) yields no issues for any
/// tree: schema assets are optional and their absence never blocks a user.
/// Unreadable files are logged and skipped.
#[must_use]
pub fn check_descriptions(mod_root: &Path, schema: &OdfSchema) -> Vec<Issue> {
    if !schema.is_enabled() {
        return Vec::new();
    }

    let mut issues = Vec::new();
    for path in find_description_files(mod_root) {
        match read_lossy(&path) {
            Ok(source) => issues.extend(check_description_source(&path, &source, schema)),
            Err(e) => warn!("could not scan {}: {e}", path.display()),
        }
    }
    issues
}

/// Validate one ODF source text
///
/// Issues come out in file-scan order: for each section, unknown fields as
/// they appear, then (when the next header opens, or at end of file) one
/// `MissingFields` issue anchored at the section's header line if any
/// required field never appeared.
#[must_use]
pub fn check_description_source(path: &Path, source: &str, schema: &OdfSchema) -> Vec<Issue> {
    let mut issues = Vec::new();
    let mut current: Option<(&str, usize)> = None;
    let mut found: HashSet<&str> = HashSet::new();

    for event in OdfParser::new(source) {
        match event {
            OdfEvent::SectionHeader { name, line } => {
                flush_missing(path, current, &found, schema, &mut issues);
                current = Some((name, line));
                found.clear();

                // Header admissibility is checked for every section,
                // independent of the previous section's field audit.
                if !schema.allows_class(name) {
                    issues.push(Issue::at_line(path, IssueKind::InvalidHeader, name, line));
                }
            }
            OdfEvent::Assignment { key, line, .. } => {
                if let Some((header, _)) = current {
                    match schema.fields_for(header) {
                        Some(allowed) if !allowed.contains(key) => {
                            issues.push(Issue::at_line(
                                path,
                                IssueKind::UnknownField,
                                format!("[{header}] {key}"),
                                line,
                            ));
                        }
                        Some(_) => {
                            found.insert(key);
                        }
                        // Class absent from the params table: unconstrained.
                        None => {}
                    }
                }
            }
        }
    }

    // The last open section has no trailing header event to trigger it.
    flush_missing(path, current, &found, schema, &mut issues);

    issues
}

fn flush_missing(
    path: &Path,
    current: Option<(&str, usize)>,
    found: &HashSet<&str>,
    schema: &OdfSchema,
    issues: &mut Vec<Issue>,
) {
    if let Some((header, header_line)) = current
        && let Some(required) = schema.fields_for(header)
    {
        let missing: Vec<&str> = required
            .iter()
            .map(String::as_str)
            .filter(|f| !found.contains(*f))
            .collect();
        if !missing.is_empty() {
            issues.push(Issue::at_line(
                path,
                IssueKind::MissingFields,
                format!("[{header}] missing: {}", missing.join(", ")),
                header_line,
            ));
        }
    }
}
