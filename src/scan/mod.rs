//! Shared issue model, aggregate scan runner, and cleanup helpers

pub mod legacy;
pub mod report;
pub mod types;

pub use legacy::{delete_legacy_files, find_legacy_files};
pub use report::{ScanReport, run_safety_scan, run_safety_scan_with_progress};
pub use types::{Issue, IssueKind, ScanPhase, ScanProgress, ScanProgressCallback};
