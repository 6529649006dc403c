//! Automatic repair for missing-field issues
//!
//! The only defect class with a safe mechanical fix: required fields that
//! never appeared in their section are appended with a zero value under a
//! marker comment, which the game engine accepts as an explicit default.
//! Defaults land at end of file, i.e. inside the file's final section, so a
//! fix only heals the file when the deficient section is the last one.
//! Callers re-run the scan afterwards to confirm.

use std::io::Write;
use std::path::Path;

use regex::Regex;
use tracing::warn;

use crate::scan::{Issue, IssueKind};

/// Apply automatic fixes to a caller-supplied subset of issues
///
/// Only `MissingFields` issues are actionable; everything else is ignored.
/// Returns the number of issues fixed. A file that cannot be written is
/// logged and skipped, never aborting the batch.
pub fn apply_quick_fixes(issues: &[Issue]) -> usize {
    // Detail format: "[Header] missing: key1, key2"
    let missing_re = Regex::new(r"missing:\s*(.+)").expect("valid pattern");

    let mut fixed = 0;
    for issue in issues {
        if issue.kind != IssueKind::MissingFields {
            continue;
        }
        let Some(caps) = missing_re.captures(&issue.detail) else {
            continue;
        };
        let keys: Vec<&str> = caps[1]
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .collect();
        if keys.is_empty() {
            continue;
        }

        match append_defaults(&issue.file, &keys) {
            Ok(()) => fixed += 1,
            Err(e) => warn!("quick fix failed for {}: {e}", issue.file.display()),
        }
    }
    fixed
}

fn append_defaults(path: &Path, keys: &[&str]) -> std::io::Result<()> {
    let mut file = std::fs::OpenOptions::new().append(true).open(path)?;
    writeln!(file)?;
    writeln!(file, "// Auto-fixed missing fields")?;
    for key in keys {
        writeln!(file, "{key} = 0")?;
    }
    Ok(())
}
