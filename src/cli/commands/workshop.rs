//! CLI command for root configuration validation

use std::path::Path;

use crate::workshop::validate_content_structure;

use super::expand_arg;

/// Validate the content folder's root configuration
pub fn validate(source: &Path) -> anyhow::Result<()> {
    let source = expand_arg(source);
    let report = validate_content_structure(&source);

    if !report.errors.is_empty() {
        println!("Errors:");
        for error in &report.errors {
            println!("  - {error}");
        }
    }

    if !report.warnings.is_empty() {
        println!("\nWarnings:");
        for warning in &report.warnings {
            println!("  - {warning}");
        }
    }

    if report.is_blocking() {
        println!("\nValidation: FAILED");
        std::process::exit(1);
    }

    println!("\nValidation: PASSED");
    Ok(())
}
