//! # bzscan
//!
//! Content validation and repair for Battlezone 98 Redux Workshop mods.
//!
//! Before a mod folder is packaged and submitted, this crate inspects it
//! with a pipeline of static analyzers and can auto-repair a subset of what
//! they find:
//!
//! - **ODF schema validation** - unknown section headers, unknown fields,
//!   required fields that never appear, checked against the auxiliary
//!   header/parameter schema files
//! - **Asset reference checking** - geometry/cockpit/turret and material
//!   texture references that resolve to nothing in the mod tree
//! - **Structure validation** - the root `.ini` configuration and the
//!   companion files its `mapType` implies
//! - **Terrain repair** - line-ending normalization and duplicate `[Size]`
//!   section removal for `.trn` files
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use bzscan::odf::SchemaLocations;
//! use bzscan::scan::run_safety_scan;
//!
//! let schema = SchemaLocations::discover().load();
//! let report = run_safety_scan(Path::new("MyMod/"), &schema);
//!
//! for (file, issues) in report.by_file() {
//!     println!("{}: {} issue(s)", file.display(), issues.len());
//! }
//! if report.has_blocking() {
//!     eprintln!("packaging blocked");
//! }
//! ```
//!
//! ### Repairing terrain files
//!
//! ```no_run
//! use std::path::Path;
//! use bzscan::terrain::{find_terrain_files, fix_line_endings};
//!
//! let files = find_terrain_files(Path::new("MyMod/"));
//! let result = fix_line_endings(&files);
//! println!("fixed {} of {} files", result.success_count, files.len());
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `bzscan` command-line binary

pub mod assets;
pub mod error;
pub mod odf;
pub mod scan;
pub mod stats;
pub mod terrain;
pub mod utils;
pub mod workshop;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};

    pub use crate::odf::{OdfEvent, OdfParser, OdfSchema, SchemaLocations};
    pub use crate::scan::{
        Issue, IssueKind, ScanPhase, ScanProgress, ScanReport, run_safety_scan,
    };
    pub use crate::assets::check_asset_references;
    pub use crate::terrain::{
        BatchFixResult, fix_duplicate_sections, fix_line_endings, scan_terrain,
    };
    pub use crate::workshop::{StructureReport, validate_content_structure};
    pub use crate::stats::{FootprintStats, analyze_footprint};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
