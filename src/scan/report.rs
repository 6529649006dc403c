//! Aggregate safety scan
//!
//! Runs every analyzer over one mod tree and folds the results into a
//! single ordered issue list. This is the surface the presentation layer
//! consumes: it can group by file or by kind, decide whether anything
//! blocks packaging, and hand subsets back to the repair functions.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::assets::check_asset_references;
use crate::error::Result;
use crate::odf::{OdfSchema, check_descriptions};
use crate::terrain::scan_terrain;
use crate::workshop::{find_config_file, validate_content_structure};

use super::types::{Issue, IssueKind, ScanPhase, ScanProgress, ScanProgressCallback};

/// Everything one validation run produced
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// Root of the scanned mod tree
    pub mod_root: PathBuf,
    /// When the scan ran
    pub generated: DateTime<Utc>,
    /// Whether ODF schema validation was active
    pub schema_enabled: bool,
    /// All issues, in scan order: structure, descriptions, assets, terrain
    pub issues: Vec<Issue>,
}

impl ScanReport {
    /// Whether the scan found nothing at all
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Whether any issue blocks packaging outright
    ///
    /// Only structural errors block; everything else needs explicit user
    /// confirmation but may be overridden.
    #[must_use]
    pub fn has_blocking(&self) -> bool {
        self.issues
            .iter()
            .any(|i| i.kind == IssueKind::StructuralError)
    }

    /// Issues grouped by file, insertion order preserved within a file
    #[must_use]
    pub fn by_file(&self) -> BTreeMap<&Path, Vec<&Issue>> {
        let mut groups: BTreeMap<&Path, Vec<&Issue>> = BTreeMap::new();
        for issue in &self.issues {
            groups.entry(issue.file.as_path()).or_default().push(issue);
        }
        groups
    }

    /// Issues grouped by kind, insertion order preserved within a kind
    #[must_use]
    pub fn by_kind(&self) -> BTreeMap<IssueKind, Vec<&Issue>> {
        let mut groups: BTreeMap<IssueKind, Vec<&Issue>> = BTreeMap::new();
        for issue in &self.issues {
            groups.entry(issue.kind).or_default().push(issue);
        }
        groups
    }

    /// Number of issues of one kind
    #[must_use]
    pub fn count(&self, kind: IssueKind) -> usize {
        self.issues.iter().filter(|i| i.kind == kind).count()
    }

    /// Serialize the report as pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Run the full safety scan over a mod tree
#[must_use]
pub fn run_safety_scan(mod_root: &Path, schema: &OdfSchema) -> ScanReport {
    run_safety_scan_with_progress(mod_root, schema, &|_| {})
}

/// Run the full safety scan over a mod tree, with progress callback
#[must_use]
pub fn run_safety_scan_with_progress(
    mod_root: &Path,
    schema: &OdfSchema,
    progress: ScanProgressCallback,
) -> ScanReport {
    let mut issues = Vec::new();

    progress(&ScanProgress::new(ScanPhase::CheckingStructure, 0, 4));
    let structure = validate_content_structure(mod_root);
    let anchor = find_config_file(mod_root).unwrap_or_else(|| mod_root.to_path_buf());
    issues.extend(structure.to_issues(&anchor));

    progress(&ScanProgress::new(ScanPhase::CheckingDescriptions, 1, 4));
    issues.extend(check_descriptions(mod_root, schema));

    progress(&ScanProgress::new(ScanPhase::CheckingAssets, 2, 4));
    issues.extend(check_asset_references(mod_root));

    progress(&ScanProgress::new(ScanPhase::CheckingTerrain, 3, 4));
    issues.extend(scan_terrain(mod_root));

    progress(&ScanProgress::new(ScanPhase::Complete, 4, 4));

    ScanReport {
        mod_root: mod_root.to_path_buf(),
        generated: Utc::now(),
        schema_enabled: schema.is_enabled(),
        issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("map.ini"), "[WORKSHOP]\nmaptype=mod\n").unwrap();
        fs::write(
            dir.path().join("tank.odf"),
            "[GameObjectClass]\ngeometryName = \"gone.geo\"\n",
        )
        .unwrap();
        fs::write(dir.path().join("map.trn"), b"[Size]\nw = 1\n[Size]\n").unwrap();
        dir
    }

    fn schema() -> OdfSchema {
        OdfSchema::from_sources(Some("GameObjectClass"), None)
    }

    #[test]
    fn test_full_scan_collects_all_kinds() {
        let dir = fixture();
        let report = run_safety_scan(dir.path(), &schema());

        assert!(report.schema_enabled);
        assert_eq!(report.count(IssueKind::MissingAsset), 1);
        assert_eq!(report.count(IssueKind::LineEndingDefect), 1);
        assert_eq!(report.count(IssueKind::DuplicateSection), 1);
        assert!(!report.has_blocking());
    }

    #[test]
    fn test_grouping_partitions_issue_list() {
        let dir = fixture();
        let report = run_safety_scan(dir.path(), &schema());

        let by_file: usize = report.by_file().values().map(Vec::len).sum();
        let by_kind: usize = report.by_kind().values().map(Vec::len).sum();
        assert_eq!(by_file, report.issues.len());
        assert_eq!(by_kind, report.issues.len());
    }

    #[test]
    fn test_structural_error_blocks() {
        let dir = tempfile::TempDir::new().unwrap();
        let report = run_safety_scan(dir.path(), &schema());
        assert!(report.has_blocking());
        assert_eq!(report.count(IssueKind::StructuralError), 1);
    }

    #[test]
    fn test_report_serializes() {
        let dir = fixture();
        let report = run_safety_scan(dir.path(), &OdfSchema::default());
        let json = report.to_json().unwrap();
        assert!(json.contains("\"issues\""));
        assert!(json.contains("MissingAsset"));
    }
}
