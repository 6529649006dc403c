//! CLI command for footprint analysis

use std::path::Path;

use crate::stats::{AssetCategory, analyze_footprint};

use super::expand_arg;

/// Analyze and print the mod's footprint
pub fn execute(source: &Path) -> anyhow::Result<()> {
    let source = expand_arg(source);
    let stats = analyze_footprint(&source);

    println!("Footprint: {}", source.display());
    println!();
    println!("Total disk size:     {}", format_size(stats.disk_size));
    println!("Est. runtime memory: {}", format_size(stats.est_runtime));
    println!();
    println!("Asset breakdown:");
    for category in [
        AssetCategory::Texture,
        AssetCategory::Model,
        AssetCategory::Audio,
        AssetCategory::Script,
        AssetCategory::Other,
    ] {
        println!("  {:<10} {:>6}", category.display_name(), stats.count(category));
    }
    println!();
    println!("Note: estimates assume non-DDS textures load uncompressed (RGBA8888).");
    println!("Use DDS for best performance.");

    Ok(())
}

/// Format byte size for display
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    const GB: u64 = 1024 * MB;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}
