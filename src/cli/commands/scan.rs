//! CLI command for the full safety scan

use std::path::Path;
use std::time::Instant;

use crate::cli::progress::{self, LOOKING_GLASS};
use crate::odf::SchemaLocations;
use crate::scan::{ScanPhase, ScanReport, run_safety_scan_with_progress};

use super::expand_arg;

/// Run every analyzer and print the aggregated report
pub fn execute(source: &Path, schema_dir: Option<&Path>, json: Option<&Path>) -> anyhow::Result<()> {
    let source = expand_arg(source);

    let locations = schema_dir.map_or_else(SchemaLocations::discover, SchemaLocations::in_dir);
    let schema = locations.load();
    if !schema.is_enabled() {
        println!("Note: schema files not found; header/field validation disabled.");
    }

    let started = Instant::now();
    let report = run_safety_scan_with_progress(&source, &schema, &|p| {
        if p.phase != ScanPhase::Complete {
            progress::print_step(p.current + 1, p.total, LOOKING_GLASS, p.phase.as_str());
        }
    });

    print_report(&report, &source);
    progress::print_done(started.elapsed());

    if let Some(path) = json {
        std::fs::write(path, report.to_json()?)?;
        println!("Wrote report to {}", path.display());
    }

    if report.has_blocking() {
        println!("\nValidation: BLOCKED (structural errors must be resolved)");
        std::process::exit(1);
    }
    Ok(())
}

fn print_report(report: &ScanReport, source: &Path) {
    if report.is_clean() {
        println!("\nNo issues found.");
        return;
    }

    for (file, issues) in report.by_file() {
        let display = file
            .strip_prefix(source)
            .unwrap_or(file)
            .display();
        println!("\n{display}:");
        for issue in issues {
            match issue.line {
                Some(line) => println!(
                    "  line {line:>4}  {:<18} {}",
                    issue.kind.display_name(),
                    issue.detail
                ),
                None => println!("  {:<28} {}", issue.kind.display_name(), issue.detail),
            }
        }
    }

    println!("\nSummary:");
    for (kind, issues) in report.by_kind() {
        println!("  {:<20} {:>4}", kind.display_name(), issues.len());
    }
}
