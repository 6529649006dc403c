//! Minimal INI document parser for the root configuration file
//!
//! The Workshop configuration is a classic INI: `[Section]` headers,
//! `key = value` pairs, `;`/`#` line comments, optional UTF-8 BOM. Lookup is
//! case-insensitive for both sections and keys. Values are stored raw
//! (quotes included); consumers strip quotes where their field demands it.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// One `[Section]` block of an INI document
#[derive(Debug, Clone, Default)]
pub struct IniSection {
    name: String,
    entries: BTreeMap<String, String>,
}

impl IniSection {
    /// Section name as written in the file
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a value by key, case-insensitively
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(&key.to_lowercase()).map(String::as_str)
    }

    /// Whether the section defines `key`, case-insensitively
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&key.to_lowercase())
    }
}

/// A parsed INI document
#[derive(Debug, Clone, Default)]
pub struct IniDocument {
    sections: BTreeMap<String, IniSection>,
}

impl IniDocument {
    /// Parse INI source text
    ///
    /// Duplicate sections merge; for duplicate keys the last assignment
    /// wins. An assignment before any section header, or a line that is
    /// neither header, assignment nor comment, is a parse error.
    pub fn parse(source: &str) -> Result<Self> {
        let source = source.strip_prefix('\u{feff}').unwrap_or(source);

        let mut doc = Self::default();
        let mut current: Option<String> = None;

        for (idx, raw) in source.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                let name = line[1..line.len() - 1].trim().to_string();
                let key = name.to_lowercase();
                doc.sections
                    .entry(key.clone())
                    .or_insert_with(|| IniSection {
                        name,
                        entries: BTreeMap::new(),
                    });
                current = Some(key);
                continue;
            }

            // configparser accepts both '=' and ':' as delimiters
            if let Some(delim) = line.find(['=', ':']) {
                let Some(section) = &current else {
                    return Err(Error::IniAssignmentOutsideSection { line: idx + 1 });
                };
                let key = line[..delim].trim().to_lowercase();
                let value = line[delim + 1..].trim().to_string();
                if key.is_empty() {
                    return Err(Error::IniMalformedLine {
                        line: idx + 1,
                        content: line.to_string(),
                    });
                }
                if let Some(sec) = doc.sections.get_mut(section) {
                    sec.entries.insert(key, value);
                }
                continue;
            }

            return Err(Error::IniMalformedLine {
                line: idx + 1,
                content: line.to_string(),
            });
        }

        Ok(doc)
    }

    /// Look up a section by name, case-insensitively
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&IniSection> {
        self.sections.get(&name.to_lowercase())
    }

    /// Whether the document contains `name`, case-insensitively
    #[must_use]
    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(&name.to_lowercase())
    }
}
