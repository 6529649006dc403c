//! Root configuration (content structure) validation
//!
//! Validates the single `.ini` file at the root of a mod content folder and
//! the companion files its `mapType` implies. Errors block packaging;
//! warnings are surfaced but only need user confirmation.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::scan::{Issue, IssueKind};
use crate::utils::read_lossy;

use super::ini::IniDocument;

/// Accepted `mapType` values
pub const VALID_MAP_TYPES: [&str; 3] = ["instant_action", "multiplayer", "mod"];

/// Companion extensions every playable map must ship
pub const ESSENTIAL_EXTENSIONS: [&str; 5] = [".hg2", ".trn", ".mat", ".bzn", ".lgt"];

/// Companion extensions a multiplayer map should ship
pub const OPTIONAL_MULTIPLAYER_EXTENSIONS: [&str; 3] = [".bmp", ".des", ".vxt"];

/// Keys expected inside `[MULTIPLAYER]`
const MULTIPLAYER_KEYS: [&str; 3] = ["minplayers", "maxplayers", "gametype"];

/// Result of content structure validation
///
/// Coarse strings rather than positioned issues: this validates exactly one
/// configuration block, not a multi-file scan.
#[derive(Clone, Debug, Default)]
pub struct StructureReport {
    /// Blocking defects; the packaging step must refuse to proceed
    pub errors: Vec<String>,
    /// Non-blocking defects, surfaced for explicit user confirmation
    pub warnings: Vec<String>,
}

impl StructureReport {
    /// Whether packaging must be refused
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Fold the report into the common issue model, anchored at `anchor`
    #[must_use]
    pub fn to_issues(&self, anchor: &Path) -> Vec<Issue> {
        let mut issues = Vec::new();
        for e in &self.errors {
            issues.push(Issue::new(anchor, IssueKind::StructuralError, e.clone()));
        }
        for w in &self.warnings {
            issues.push(Issue::new(anchor, IssueKind::StructuralWarning, w.clone()));
        }
        issues
    }

    fn error(mut self, msg: impl Into<String>) -> Self {
        self.errors.push(msg.into());
        self
    }
}

/// Validate the content folder's root configuration
///
/// Side effect: any file literally named `desktop.ini` is removed before the
/// checks run (best effort; removal failure is logged, not fatal).
pub fn validate_content_structure(mod_dir: &Path) -> StructureReport {
    let report = StructureReport::default();

    let entries = match std::fs::read_dir(mod_dir) {
        Ok(entries) => entries,
        Err(e) => return report.error(format!("Could not access content folder: {e}")),
    };

    // Directory-listing order is preserved on purpose; see the multi-ini
    // warning below.
    let mut names: Vec<String> = Vec::new();
    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().to_string();
        if name.eq_ignore_ascii_case("desktop.ini") {
            match std::fs::remove_file(entry.path()) {
                Ok(()) => info!("removed hidden system file: {name}"),
                Err(e) => warn!("could not remove {name}: {e}"),
            }
            continue;
        }
        names.push(name);
    }

    let ini_names: Vec<&String> = names
        .iter()
        .filter(|n| {
            n.to_lowercase().ends_with(".ini") && mod_dir.join(n.as_str()).is_file()
        })
        .collect();

    let Some(&target_ini) = ini_names.first() else {
        return report.error("Missing configuration (.ini) file in content root.");
    };
    let target_ini = target_ini.clone();

    let mut report = report;
    if ini_names.len() > 1 {
        let ignored: Vec<&str> = ini_names[1..].iter().map(|n| n.as_str()).collect();
        report.warnings.push(format!(
            "Multiple configuration (.ini) files found; using '{target_ini}' (ignoring: {})",
            ignored.join(", ")
        ));
    }

    let ini_path = mod_dir.join(&target_ini);
    let config = match read_lossy(&ini_path).map_err(|e| e.to_string()).and_then(|text| {
        IniDocument::parse(&text).map_err(|e| e.to_string())
    }) {
        Ok(doc) => doc,
        Err(e) => return report.error(format!("Failed to parse {target_ini}: {e}")),
    };

    let Some(workshop) = config.section("WORKSHOP") else {
        return report.error(format!("{target_ini} missing [WORKSHOP] section."));
    };

    let map_type = workshop
        .get("maptype")
        .unwrap_or_default()
        .trim()
        .trim_matches('"')
        .trim_matches('\'')
        .to_lowercase();

    if !VALID_MAP_TYPES.contains(&map_type.as_str()) {
        return report.error(format!(
            "Invalid mapType '{map_type}' in {target_ini}.\nMust be one of: {}",
            VALID_MAP_TYPES.join(", ")
        ));
    }

    let base_name = target_ini
        .rsplit_once('.')
        .map_or(target_ini.as_str(), |(stem, _)| stem);
    let names_lower: Vec<String> = names.iter().map(|n| n.to_lowercase()).collect();
    let check_ext = |ext: &str, required: bool, report: &mut StructureReport| {
        let wanted = format!("{base_name}{ext}").to_lowercase();
        if !names_lower.contains(&wanted) {
            let (dest, class) = if required {
                (&mut report.errors, "essential")
            } else {
                (&mut report.warnings, "optional")
            };
            dest.push(format!("Missing {class} file: {base_name}{ext}"));
        }
    };

    if map_type == "multiplayer" || map_type == "instant_action" {
        for ext in ESSENTIAL_EXTENSIONS {
            check_ext(ext, true, &mut report);
        }

        if map_type == "multiplayer" {
            for ext in OPTIONAL_MULTIPLAYER_EXTENSIONS {
                check_ext(ext, false, &mut report);
            }
            if let Some(section) = config.section("MULTIPLAYER") {
                for key in MULTIPLAYER_KEYS {
                    if !section.contains_key(key) {
                        report.warnings.push(format!("[MULTIPLAYER] missing '{key}'"));
                    }
                }
            } else {
                report
                    .errors
                    .push(format!("{target_ini} missing [MULTIPLAYER] section."));
            }
        }
    }

    report
}

/// Path of the configuration file the validator would pick, if any
///
/// Exposed so callers can anchor structural issues at the actual file.
#[must_use]
pub fn find_config_file(mod_dir: &Path) -> Option<PathBuf> {
    let entries = std::fs::read_dir(mod_dir).ok()?;
    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().to_string();
        if name.to_lowercase().ends_with(".ini")
            && !name.eq_ignore_ascii_case("desktop.ini")
            && entry.path().is_file()
        {
            return Some(entry.path());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_map(dir: &Path, map_type: &str, companions: &[&str]) {
        fs::write(
            dir.join("map.ini"),
            format!("[WORKSHOP]\nmaptype={map_type}\n"),
        )
        .unwrap();
        for ext in companions {
            fs::write(dir.join(format!("map{ext}")), b"x").unwrap();
        }
    }

    #[test]
    fn test_missing_ini_is_error() {
        let temp = TempDir::new().unwrap();
        let report = validate_content_structure(temp.path());
        assert_eq!(
            report.errors,
            vec!["Missing configuration (.ini) file in content root.".to_string()]
        );
    }

    #[test]
    fn test_desktop_ini_removed_and_not_chosen() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("desktop.ini"), b"[.]").unwrap();
        let report = validate_content_structure(temp.path());
        assert!(report.is_blocking());
        assert!(!temp.path().join("desktop.ini").exists());
    }

    #[test]
    fn test_invalid_map_type() {
        let temp = TempDir::new().unwrap();
        write_map(temp.path(), "campaign", &[]);
        let report = validate_content_structure(temp.path());
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("Invalid mapType 'campaign' in map.ini."));
        assert!(report.errors[0].contains("instant_action, multiplayer, mod"));
    }

    #[test]
    fn test_mod_type_needs_no_companions() {
        let temp = TempDir::new().unwrap();
        write_map(temp.path(), "mod", &[]);
        let report = validate_content_structure(temp.path());
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_quoted_map_type_accepted() {
        let temp = TempDir::new().unwrap();
        write_map(
            temp.path(),
            "\"MOD\"",
            &[],
        );
        let report = validate_content_structure(temp.path());
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_multiplayer_missing_trn_named() {
        let temp = TempDir::new().unwrap();
        write_map(temp.path(), "multiplayer", &[".hg2", ".mat", ".bzn", ".lgt"]);
        let report = validate_content_structure(temp.path());
        assert!(report.errors.iter().any(|e| e.contains(".trn")));
    }

    #[test]
    fn test_multiplayer_scenario_from_design() {
        // map.ini + all essential companions, no optional files and no
        // [MULTIPLAYER] section
        let temp = TempDir::new().unwrap();
        write_map(
            temp.path(),
            "multiplayer",
            &[".hg2", ".trn", ".mat", ".bzn", ".lgt"],
        );
        let report = validate_content_structure(temp.path());
        assert_eq!(
            report.errors,
            vec!["map.ini missing [MULTIPLAYER] section.".to_string()]
        );
        let optional: Vec<&String> = report
            .warnings
            .iter()
            .filter(|w| w.starts_with("Missing optional file:"))
            .collect();
        assert_eq!(optional.len(), 3);
    }

    #[test]
    fn test_multiplayer_keys_warned() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("map.ini"),
            "[WORKSHOP]\nmaptype=multiplayer\n[MULTIPLAYER]\nminplayers=2\n",
        )
        .unwrap();
        for ext in ESSENTIAL_EXTENSIONS
            .iter()
            .chain(OPTIONAL_MULTIPLAYER_EXTENSIONS.iter())
        {
            fs::write(temp.path().join(format!("map{ext}")), b"x").unwrap();
        }
        let report = validate_content_structure(temp.path());
        assert!(report.errors.is_empty());
        assert_eq!(
            report.warnings,
            vec![
                "[MULTIPLAYER] missing 'maxplayers'".to_string(),
                "[MULTIPLAYER] missing 'gametype'".to_string(),
            ]
        );
    }

    #[test]
    fn test_multiple_ini_surfaced_as_warning() {
        let temp = TempDir::new().unwrap();
        write_map(temp.path(), "mod", &[]);
        fs::write(temp.path().join("other.ini"), "[WORKSHOP]\nmaptype=mod\n").unwrap();
        let report = validate_content_structure(temp.path());
        assert!(report.errors.is_empty());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("Multiple configuration"));
    }

    #[test]
    fn test_unparseable_ini() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("map.ini"), "garbage without sections\n").unwrap();
        let report = validate_content_structure(temp.path());
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("Failed to parse map.ini:"));
    }
}
