//! ODF schema loading
//!
//! The schema is assembled from two auxiliary text files shipped next to the
//! tool: a flat list of allowed class headers, and a block-structured table
//! of allowed parameters per class. Both are optional - a missing or empty
//! schema disables validation rather than failing, so users without the
//! schema assets are never blocked.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::debug;

use crate::utils::read_lossy;

/// Default file name of the allowed-header list
pub const HEADER_LIST_FILE: &str = "odfHeaderList.txt";
/// Default file name of the per-class allowed-parameter table
pub const PARAMS_FILE: &str = "bzrODFparams.txt";

/// Allowed section headers and per-class field sets for ODF validation
///
/// Built once per validation run and immutable thereafter. Ordered
/// collections keep missing-field listings deterministic.
#[derive(Debug, Clone, Default)]
pub struct OdfSchema {
    allowed_classes: BTreeSet<String>,
    allowed_fields: BTreeMap<String, BTreeSet<String>>,
}

impl OdfSchema {
    /// Load the schema from the two source files
    ///
    /// A file that does not exist or cannot be read contributes nothing;
    /// the result may be a disabled (empty) schema, which is a valid state.
    #[must_use]
    pub fn load(headers_path: &Path, params_path: &Path) -> Self {
        let headers = match read_lossy(headers_path) {
            Ok(text) => Some(text),
            Err(e) => {
                debug!("header list {} not loaded: {e}", headers_path.display());
                None
            }
        };
        let params = match read_lossy(params_path) {
            Ok(text) => Some(text),
            Err(e) => {
                debug!("params table {} not loaded: {e}", params_path.display());
                None
            }
        };
        Self::from_sources(headers.as_deref(), params.as_deref())
    }

    /// Build the schema from in-memory source text
    #[must_use]
    pub fn from_sources(headers: Option<&str>, params: Option<&str>) -> Self {
        let mut schema = Self::default();

        if let Some(text) = headers {
            schema.allowed_classes = text
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(String::from)
                .collect();
        }

        if let Some(text) = params {
            schema.parse_params(text);
        }

        schema
    }

    fn parse_params(&mut self, text: &str) {
        // Bracketed lines that are not a bare identifier close the current
        // block without opening a new one.
        let class_re = Regex::new(r"^[A-Za-z0-9_]+$").expect("valid pattern");
        let mut current_class: Option<String> = None;

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('-') || line.starts_with("//") {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                let name = &line[1..line.len() - 1];
                if class_re.is_match(name) {
                    self.allowed_fields.entry(name.to_string()).or_default();
                    current_class = Some(name.to_string());
                } else {
                    current_class = None;
                }
            } else if let Some(class) = &current_class
                && let Some(token) = line.split_whitespace().next()
            {
                // "paramName? -comment" -> "paramName"; a single trailing
                // `?` marks an optional parameter in the source table.
                let field = token.strip_suffix('?').unwrap_or(token);
                if let Some(fields) = self.allowed_fields.get_mut(class) {
                    fields.insert(field.to_string());
                }
            }
        }
    }

    /// Whether header/field validation is active at all
    ///
    /// An empty allowed-class set means "no schema available" and disables
    /// the description scan entirely, even if the params table was present.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.allowed_classes.is_empty()
    }

    /// Whether `name` is an allowed section header
    #[must_use]
    pub fn allows_class(&self, name: &str) -> bool {
        self.allowed_classes.contains(name)
    }

    /// The allowed field set for `class`, or `None` if the class is
    /// unconstrained (absent from the params table)
    #[must_use]
    pub fn fields_for(&self, class: &str) -> Option<&BTreeSet<String>> {
        self.allowed_fields.get(class)
    }

    /// Number of allowed classes
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.allowed_classes.len()
    }
}

/// Where the two schema source files live on disk
#[derive(Debug, Clone)]
pub struct SchemaLocations {
    /// Path to the allowed-header list
    pub headers: PathBuf,
    /// Path to the allowed-parameter table
    pub params: PathBuf,
}

impl SchemaLocations {
    /// Both schema files inside one directory, under their default names
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            headers: dir.join(HEADER_LIST_FILE),
            params: dir.join(PARAMS_FILE),
        }
    }

    /// Resolve the default schema directory
    ///
    /// Looks next to the running executable first (how the tool ships), then
    /// falls back to the platform data directory. The returned paths may not
    /// exist; loading degrades to a disabled schema in that case.
    #[must_use]
    pub fn discover() -> Self {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(Path::to_path_buf));

        if let Some(dir) = exe_dir {
            let candidate = Self::in_dir(&dir);
            if candidate.headers.exists() {
                return candidate;
            }
        }

        let data_dir = dirs::data_dir()
            .map(|d| d.join("bzscan"))
            .unwrap_or_else(|| PathBuf::from("."));
        Self::in_dir(&data_dir)
    }

    /// Load the schema from these locations
    #[must_use]
    pub fn load(&self) -> OdfSchema {
        OdfSchema::load(&self.headers, &self.params)
    }
}
