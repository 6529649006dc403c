//! Mod footprint analysis
//!
//! Estimates the disk and runtime memory cost of a mod tree. Classification
//! is by file extension only; estimation constants assume non-DDS images are
//! loaded uncompressed (RGBA8888) while DDS stays compressed in memory.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use tracing::debug;
use walkdir::WalkDir;

/// Broad asset category, derived from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum AssetCategory {
    /// Image files (png, tga, bmp, jpg, jpeg, tif, tiff, dds)
    Texture,
    /// Mesh files (x, geo, xsi, 3ds)
    Model,
    /// Audio files (wav, ogg)
    Audio,
    /// Script and description files (lua, odf, inf)
    Script,
    /// Everything else
    Other,
}

impl AssetCategory {
    /// Classify a lower-cased extension
    #[must_use]
    pub fn from_extension(ext: &str) -> Self {
        match ext {
            "png" | "tga" | "bmp" | "jpg" | "jpeg" | "tif" | "tiff" | "dds" => Self::Texture,
            "x" | "geo" | "xsi" | "3ds" => Self::Model,
            "wav" | "ogg" => Self::Audio,
            "lua" | "odf" | "inf" => Self::Script,
            _ => Self::Other,
        }
    }

    /// Human-readable label
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Texture => "Textures",
            Self::Model => "Models",
            Self::Audio => "Audio",
            Self::Script => "Scripts",
            Self::Other => "Other",
        }
    }
}

/// Disk and estimated runtime footprint of a mod tree
#[derive(Debug, Clone, Default, Serialize)]
pub struct FootprintStats {
    /// Total bytes on disk
    pub disk_size: u64,
    /// Estimated bytes resident at runtime
    pub est_runtime: u64,
    /// File counts per category
    pub counts: BTreeMap<AssetCategory, usize>,
}

impl FootprintStats {
    /// File count for one category
    #[must_use]
    pub fn count(&self, category: AssetCategory) -> usize {
        self.counts.get(&category).copied().unwrap_or(0)
    }
}

/// Walk a mod tree and total up its footprint
///
/// Files whose metadata cannot be read are logged and skipped.
#[must_use]
pub fn analyze_footprint(root: &Path) -> FootprintStats {
    let mut stats = FootprintStats::default();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.path().is_file())
    {
        let size = match entry.metadata() {
            Ok(meta) => meta.len(),
            Err(e) => {
                debug!("skipped {}: {e}", entry.path().display());
                continue;
            }
        };
        stats.disk_size += size;

        let ext = entry
            .path()
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let category = AssetCategory::from_extension(&ext);
        *stats.counts.entry(category).or_insert(0) += 1;

        // Rough ratios: ~4 bytes/pixel plus mipmaps for compressed images,
        // vertex/index buffer expansion for meshes.
        stats.est_runtime += match (category, ext.as_str()) {
            (AssetCategory::Texture, "dds") => size,
            (AssetCategory::Texture, _) => size.saturating_mul(5),
            (AssetCategory::Model, _) => size.saturating_mul(3),
            _ => 0,
        };
    }

    stats
}
