//! CLI commands for ODF schema validation and repair

use std::path::Path;

use crate::odf::{SchemaLocations, apply_quick_fixes, check_descriptions};
use crate::scan::IssueKind;

use super::expand_arg;

fn load_schema(schema_dir: Option<&Path>) -> crate::odf::OdfSchema {
    schema_dir
        .map_or_else(SchemaLocations::discover, SchemaLocations::in_dir)
        .load()
}

/// Validate every ODF file against the schema
pub fn check(source: &Path, schema_dir: Option<&Path>) -> anyhow::Result<()> {
    let source = expand_arg(source);
    let schema = load_schema(schema_dir);

    if !schema.is_enabled() {
        println!("Schema files not found - nothing to check.");
        return Ok(());
    }

    let issues = check_descriptions(&source, &schema);
    if issues.is_empty() {
        println!("All ODF files conform to the schema.");
        return Ok(());
    }

    for issue in &issues {
        println!(
            "{}:{}  {:<15} {}",
            issue.display_path(&source),
            issue.line.unwrap_or(0),
            issue.kind.display_name(),
            issue.detail
        );
    }
    println!("\n{} issue(s) found", issues.len());
    std::process::exit(1);
}

/// Apply automatic fixes for missing required fields
pub fn fix(source: &Path, schema_dir: Option<&Path>) -> anyhow::Result<()> {
    let source = expand_arg(source);
    let schema = load_schema(schema_dir);

    if !schema.is_enabled() {
        println!("Schema files not found - nothing to fix.");
        return Ok(());
    }

    let issues = check_descriptions(&source, &schema);
    let fixable = issues
        .iter()
        .filter(|i| i.kind == IssueKind::MissingFields)
        .count();
    if fixable == 0 {
        println!("No fixable issues found.");
        return Ok(());
    }

    let fixed = apply_quick_fixes(&issues);
    println!("Applied fixes to {fixed} of {fixable} issue(s). Re-run the scan to verify.");
    Ok(())
}
