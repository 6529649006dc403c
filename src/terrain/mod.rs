//! Terrain (`.trn`) file defect detection and repair

pub mod repair;
pub mod scan;

pub use repair::{
    BatchFixResult, fix_duplicate_sections, fix_duplicate_sections_with_progress,
    fix_line_endings, fix_line_endings_with_progress, normalize_line_endings,
    remove_duplicate_size_sections,
};
pub use scan::{duplicate_size_lines, find_terrain_files, first_line_ending_defect, scan_terrain};
