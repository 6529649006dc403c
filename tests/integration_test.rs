use std::fs;
use std::path::Path;

use bzscan::prelude::*;
use bzscan::terrain::find_terrain_files;
use tempfile::TempDir;

const HEADERS: &str = "GameObjectClass\nWeaponClass\nCraftClass\n";
const PARAMS: &str = "\
[GameObjectClass]
geometryName
classLabel
scrapValue? -optional in the editor, still expected here
[CraftClass]
rangeScan
";

/// Build a multiplayer map folder with a little of everything wrong
fn defective_mod() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    fs::write(
        root.join("canyon.ini"),
        "[WORKSHOP]\nmapType = \"multiplayer\"\n[MULTIPLAYER]\nminplayers = 2\nmaxplayers = 8\ngametype = DM\n",
    )
    .unwrap();
    for ext in [".hg2", ".trn", ".mat", ".bzn", ".lgt", ".bmp", ".des", ".vxt"] {
        if ext != ".trn" {
            fs::write(root.join(format!("canyon{ext}")), b"data").unwrap();
        }
    }
    // terrain file with LF endings and a duplicated [Size] block
    fs::write(
        root.join("canyon.trn"),
        b"[Size]\nwidth = 1280\n[Size]\nwidth = 9999\n[Water]\nlevel = 2\n",
    )
    .unwrap();

    // unit with an unknown field, a missing required field, and a dangling
    // geometry reference
    fs::write(
        root.join("tank.odf"),
        "[GameObjectClass]\ngeometryName = \"missing.geo\"\nclassLabel = tank\nbogus = 1\n[UnlistedClass]\n",
    )
    .unwrap();
    // a clean unit whose geometry exists (different case on purpose)
    fs::write(root.join("Scout.GEO"), b"bin").unwrap();
    fs::write(
        root.join("scout.odf"),
        "[GameObjectClass]\ngeometryName = \"scout.geo\"\nclassLabel = scout\nscrapValue = 2\n",
    )
    .unwrap();
    fs::write(root.join("old_editor.map"), b"legacy").unwrap();

    dir
}

fn schema() -> OdfSchema {
    OdfSchema::from_sources(Some(HEADERS), Some(PARAMS))
}

#[test]
fn test_full_scan_finds_every_defect_class() {
    let dir = defective_mod();
    let report = run_safety_scan(dir.path(), &schema());

    assert!(report.schema_enabled);
    assert!(!report.has_blocking(), "structure is valid: {:?}", report.issues);

    let by_kind = report.by_kind();
    assert_eq!(by_kind[&IssueKind::UnknownField].len(), 1);
    assert_eq!(by_kind[&IssueKind::MissingFields].len(), 1);
    assert_eq!(by_kind[&IssueKind::InvalidHeader].len(), 1);
    assert_eq!(by_kind[&IssueKind::MissingAsset].len(), 1);
    assert_eq!(by_kind[&IssueKind::LineEndingDefect].len(), 1);
    assert_eq!(by_kind[&IssueKind::DuplicateSection].len(), 1);
    assert!(!by_kind.contains_key(&IssueKind::StructuralError));

    // grouping partitions the list
    let total: usize = report.by_file().values().map(Vec::len).sum();
    assert_eq!(total, report.issues.len());
}

#[test]
fn test_missing_fields_detail_lists_each_name_once() {
    let dir = defective_mod();
    let report = run_safety_scan(dir.path(), &schema());

    let missing = &report.by_kind()[&IssueKind::MissingFields][0];
    // tank.odf never assigns scrapValue; geometryName and classLabel are set
    assert_eq!(missing.detail, "[GameObjectClass] missing: scrapValue");
    assert!(missing.file.ends_with("tank.odf"));
}

#[test]
fn test_schema_disabled_invariant() {
    let dir = defective_mod();
    // headers file empty: validation disabled even with params present
    let disabled = OdfSchema::from_sources(Some(""), Some(PARAMS));
    let report = run_safety_scan(dir.path(), &disabled);

    assert!(!report.schema_enabled);
    assert_eq!(report.count(IssueKind::InvalidHeader), 0);
    assert_eq!(report.count(IssueKind::UnknownField), 0);
    assert_eq!(report.count(IssueKind::MissingFields), 0);
    // non-schema scanners still ran
    assert_eq!(report.count(IssueKind::MissingAsset), 1);
    assert_eq!(report.count(IssueKind::LineEndingDefect), 1);
}

#[test]
fn test_terrain_repair_round_trip() {
    let dir = defective_mod();
    let files = find_terrain_files(dir.path());
    assert_eq!(files.len(), 1);

    let dup = fix_duplicate_sections(&files);
    assert_eq!(dup.success_count, 1);
    let endings = fix_line_endings(&files);
    assert_eq!(endings.success_count, 1);

    let text = fs::read_to_string(&files[0]).unwrap();
    assert_eq!(text.matches("[Size]").count(), 1);
    assert!(text.contains("width = 1280"));
    assert!(!text.contains("9999"));
    assert!(text.contains("[Water]\r\nlevel = 2"));

    // rescan is clean
    let report = run_safety_scan(dir.path(), &schema());
    assert_eq!(report.count(IssueKind::LineEndingDefect), 0);
    assert_eq!(report.count(IssueKind::DuplicateSection), 0);
}

#[test]
fn test_line_ending_fix_idempotent_on_disk() {
    let dir = TempDir::new().unwrap();
    let trn = dir.path().join("a.trn");
    fs::write(&trn, b"mixed\nendings\rhere\r\n").unwrap();
    let files = vec![trn.clone()];

    fix_line_endings(&files);
    let once = fs::read(&trn).unwrap();
    fix_line_endings(&files);
    let twice = fs::read(&trn).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_quick_fix_then_rescan() {
    // fixes append at end of file, so they only heal a file whose deficient
    // section is the last one - keep this fixture to a single section
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("map.ini"), "[WORKSHOP]\nmaptype=mod\n").unwrap();
    fs::write(dir.path().join("unit.geo"), b"bin").unwrap();
    fs::write(
        dir.path().join("unit.odf"),
        "[GameObjectClass]\ngeometryName = \"unit.geo\"\n",
    )
    .unwrap();

    let schema = schema();
    let report = run_safety_scan(dir.path(), &schema);
    assert_eq!(report.count(IssueKind::MissingFields), 1);

    let fixed = bzscan::odf::apply_quick_fixes(&report.issues);
    assert_eq!(fixed, 1);

    let report = run_safety_scan(dir.path(), &schema);
    assert_eq!(report.count(IssueKind::MissingFields), 0);
}

#[test]
fn test_structure_validation_blocks_on_missing_companion() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("arena.ini"),
        "[WORKSHOP]\nmaptype=instant_action\n",
    )
    .unwrap();
    fs::write(dir.path().join("arena.hg2"), b"x").unwrap();

    let report = validate_content_structure(dir.path());
    assert!(report.is_blocking());
    // every essential extension except .hg2 is reported
    for ext in [".trn", ".mat", ".bzn", ".lgt"] {
        assert!(
            report.errors.iter().any(|e| e.contains(ext)),
            "no error names {ext}: {:?}",
            report.errors
        );
    }
    assert!(report.warnings.is_empty());
}

#[test]
fn test_legacy_cleanup() {
    let dir = defective_mod();
    let legacy = bzscan::scan::find_legacy_files(dir.path());
    assert_eq!(legacy.len(), 1);
    assert_eq!(bzscan::scan::delete_legacy_files(&legacy), 1);
    assert!(bzscan::scan::find_legacy_files(dir.path()).is_empty());
}

#[test]
fn test_footprint_analysis() {
    let dir = defective_mod();
    let stats = analyze_footprint(dir.path());

    assert!(stats.disk_size > 0);
    // two .odf scripts
    assert_eq!(stats.count(bzscan::stats::AssetCategory::Script), 2);
    // Scout.GEO counts as a model despite its case
    assert_eq!(stats.count(bzscan::stats::AssetCategory::Model), 1);
}

#[test]
fn test_report_json_export() {
    let dir = defective_mod();
    let report = run_safety_scan(dir.path(), &schema());
    let json = report.to_json().unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(
        value["issues"].as_array().unwrap().len(),
        report.issues.len()
    );
    assert_eq!(value["schema_enabled"], true);
}

#[test]
fn test_record_parser_agrees_with_validator_on_comments() {
    // a commented-out header must not open a section anywhere in the pipeline
    let src = "// [GameObjectClass]\n[WeaponClass]\nwpnName = x -- inline\n";
    let events: Vec<OdfEvent> = OdfParser::new(src).collect();
    assert_eq!(events.len(), 2);
    let path = Path::new("w.odf");
    let issues = bzscan::odf::check_description_source(path, src, &schema());
    assert!(issues.is_empty(), "{issues:?}");
}
