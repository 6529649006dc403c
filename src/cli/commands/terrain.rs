//! CLI commands for terrain file checking and repair

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::cli::progress;
use crate::scan::IssueKind;
use crate::terrain::{
    fix_duplicate_sections_with_progress, fix_line_endings_with_progress, scan_terrain,
};

use super::expand_arg;

/// Scan terrain files and report defects
pub fn check(source: &Path) -> anyhow::Result<()> {
    let source = expand_arg(source);
    let issues = scan_terrain(&source);

    if issues.is_empty() {
        println!("All terrain files are clean.");
        return Ok(());
    }

    for issue in &issues {
        println!(
            "{}  {:<20} {}",
            issue.display_path(&source),
            issue.kind.display_name(),
            issue.detail
        );
    }
    println!("\n{} defect(s) found (run `bzscan terrain fix` to repair)", issues.len());
    std::process::exit(1);
}

/// Repair terrain file defects in place
///
/// With no flags, both repairs run; `--endings`/`--duplicates` narrow to one.
pub fn fix(source: &Path, endings: bool, duplicates: bool) -> anyhow::Result<()> {
    let source = expand_arg(source);
    let (endings, duplicates) = if endings || duplicates {
        (endings, duplicates)
    } else {
        (true, true)
    };

    let issues = scan_terrain(&source);
    let files_with = |kind: IssueKind| -> Vec<PathBuf> {
        issues
            .iter()
            .filter(|i| i.kind == kind)
            .map(|i| i.file.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    };

    let mut fixed = 0;
    let mut failed = 0;

    if endings {
        let files = files_with(IssueKind::LineEndingDefect);
        if !files.is_empty() {
            let pb = progress::simple_bar(files.len() as u64, "Normalizing line endings");
            let result = fix_line_endings_with_progress(&files, &|p| {
                pb.set_position(p.current as u64);
            });
            pb.finish_and_clear();
            fixed += result.success_count;
            failed += result.fail_count;
            report_failures(&result.results);
        }
    }

    if duplicates {
        let files = files_with(IssueKind::DuplicateSection);
        if !files.is_empty() {
            let pb = progress::simple_bar(files.len() as u64, "Removing duplicate sections");
            let result = fix_duplicate_sections_with_progress(&files, &|p| {
                pb.set_position(p.current as u64);
            });
            pb.finish_and_clear();
            fixed += result.success_count;
            failed += result.fail_count;
            report_failures(&result.results);
        }
    }

    if fixed == 0 && failed == 0 {
        println!("Nothing to fix.");
    } else {
        println!("Repair complete: {fixed} fixed, {failed} failed");
    }
    Ok(())
}

fn report_failures(results: &[String]) {
    for msg in results.iter().filter(|m| m.starts_with("Failed")) {
        println!("  {msg}");
    }
}
