//! CLI commands for legacy file cleanup

use std::path::Path;

use crate::scan::{delete_legacy_files, find_legacy_files};

use super::expand_arg;

/// List legacy .map files
pub fn find(source: &Path) -> anyhow::Result<()> {
    let source = expand_arg(source);
    let files = find_legacy_files(&source);

    if files.is_empty() {
        println!("No legacy .map files found in: {}", source.display());
    } else {
        println!("Found {} legacy file(s):", files.len());
        for file in &files {
            let display = file.strip_prefix(&source).unwrap_or(file.as_path()).display();
            println!("  {display}");
        }
    }
    Ok(())
}

/// Delete legacy .map files
pub fn clean(source: &Path) -> anyhow::Result<()> {
    let source = expand_arg(source);
    let files = find_legacy_files(&source);

    if files.is_empty() {
        println!("No legacy .map files found in: {}", source.display());
        return Ok(());
    }

    let deleted = delete_legacy_files(&files);
    println!("Deleted {deleted} of {} legacy file(s)", files.len());
    Ok(())
}
