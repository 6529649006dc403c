//! CLI command for asset reference checking

use std::path::Path;

use crate::assets::check_asset_references;

use super::expand_arg;

/// Report every unresolved asset reference
pub fn check(source: &Path) -> anyhow::Result<()> {
    let source = expand_arg(source);
    let issues = check_asset_references(&source);

    if issues.is_empty() {
        println!("All asset references resolve.");
        return Ok(());
    }

    for issue in &issues {
        println!(
            "{}:{}  {}",
            issue.display_path(&source),
            issue.line.unwrap_or(0),
            issue.detail
        );
    }
    println!("\n{} unresolved reference(s)", issues.len());
    std::process::exit(1);
}
