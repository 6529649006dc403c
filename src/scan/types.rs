//! Issue model and progress types shared by all scanners

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Category of a reported defect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum IssueKind {
    /// A section header not present in the allowed-class list
    InvalidHeader,
    /// A field not present in its section's allowed set
    UnknownField,
    /// Fields required by the schema but absent by end of section
    MissingFields,
    /// A referenced asset file that does not exist in the mod tree
    MissingAsset,
    /// A terrain file with inconsistent line endings
    LineEndingDefect,
    /// A terrain file with a duplicated `[Size]` section
    DuplicateSection,
    /// A blocking defect in the root configuration
    StructuralError,
    /// A non-blocking defect in the root configuration
    StructuralWarning,
}

impl IssueKind {
    /// Human-readable label, matching the grouping headers the UI shows
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::InvalidHeader => "Invalid Header",
            Self::UnknownField => "Unknown Field",
            Self::MissingFields => "Missing Fields",
            Self::MissingAsset => "Missing Asset",
            Self::LineEndingDefect => "Line Ending Defect",
            Self::DuplicateSection => "Duplicate Section",
            Self::StructuralError => "Structural Error",
            Self::StructuralWarning => "Structural Warning",
        }
    }
}

/// A single reported defect
///
/// Issues are pure data: scanners never raise on a content defect, they emit
/// one of these. They are the unit both of reporting and of auto-fix
/// targeting (the repair functions accept a caller-supplied subset).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// File the defect was found in
    pub file: PathBuf,
    /// Defect category
    pub kind: IssueKind,
    /// Human-readable detail
    pub detail: String,
    /// 1-based line number, if the defect is line-anchored
    pub line: Option<usize>,
}

impl Issue {
    /// Create a whole-file issue (no line anchor)
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, kind: IssueKind, detail: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            kind,
            detail: detail.into(),
            line: None,
        }
    }

    /// Create a line-anchored issue
    #[must_use]
    pub fn at_line(
        file: impl Into<PathBuf>,
        kind: IssueKind,
        detail: impl Into<String>,
        line: usize,
    ) -> Self {
        Self {
            file: file.into(),
            kind,
            detail: detail.into(),
            line: Some(line),
        }
    }

    /// The issue's path relative to `root`, for display
    #[must_use]
    pub fn display_path(&self, root: &Path) -> String {
        crate::utils::relative_path(&self.file, root)
            .unwrap_or_else(|| self.file.to_string_lossy().to_string())
    }
}

/// Progress callback type for scan and repair operations
pub type ScanProgressCallback<'a> = &'a (dyn Fn(&ScanProgress) + Sync + Send);

/// Progress information during a scan or repair run
#[derive(Debug, Clone)]
pub struct ScanProgress {
    /// Current operation phase
    pub phase: ScanPhase,
    /// Current item number (1-indexed)
    pub current: usize,
    /// Total number of items
    pub total: usize,
    /// Current file being processed (if applicable)
    pub current_file: Option<String>,
}

impl ScanProgress {
    /// Create a new progress update
    #[must_use]
    pub fn new(phase: ScanPhase, current: usize, total: usize) -> Self {
        Self {
            phase,
            current,
            total,
            current_file: None,
        }
    }

    /// Create a progress update with a file/item name
    #[must_use]
    pub fn with_file(
        phase: ScanPhase,
        current: usize,
        total: usize,
        file: impl Into<String>,
    ) -> Self {
        Self {
            phase,
            current,
            total,
            current_file: Some(file.into()),
        }
    }

    /// Get the progress percentage (0.0 - 1.0)
    #[must_use]
    pub fn percentage(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.current as f32 / self.total as f32
        }
    }
}

/// Phase of a scan or repair run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    /// Checking the root configuration
    CheckingStructure,
    /// Validating ODF description files against the schema
    CheckingDescriptions,
    /// Resolving asset references
    CheckingAssets,
    /// Scanning terrain files for structural defects
    CheckingTerrain,
    /// Applying repairs
    Fixing,
    /// Operation complete
    Complete,
}

impl ScanPhase {
    /// Get a human-readable description of this phase
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CheckingStructure => "Checking structure",
            Self::CheckingDescriptions => "Checking descriptions",
            Self::CheckingAssets => "Checking asset references",
            Self::CheckingTerrain => "Checking terrain files",
            Self::Fixing => "Applying fixes",
            Self::Complete => "Complete",
        }
    }
}
