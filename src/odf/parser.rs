//! Line-oriented parser for the ODF description format
//!
//! ODF files are INI-like: `[ClassName]` headers introduce blocks of
//! `key = value` assignments, with `//` and `--` line comments. Every
//! consumer (schema validation, safety scanning, repair) classifies lines
//! through this module so they agree on comment and blank-line semantics.

/// One classified line of an ODF file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OdfEvent<'a> {
    /// A `[ClassName]` header line
    SectionHeader {
        /// Text between the brackets, untrimmed
        name: &'a str,
        /// 1-based line number
        line: usize,
    },
    /// A `key = value` assignment inside an open section
    Assignment {
        /// Text before the first `=`, trimmed
        key: &'a str,
        /// Text after the first `=`, trimmed
        value: &'a str,
        /// 1-based line number
        line: usize,
    },
}

/// Strip `//` and `--` line comments and trim surrounding whitespace
#[must_use]
pub fn strip_comment(line: &str) -> &str {
    let end = line.find("//").unwrap_or(line.len());
    let line = &line[..end];
    let end = line.find("--").unwrap_or(line.len());
    line[..end].trim()
}

/// Strip only `//` line comments and trim
///
/// The asset-reference scanner matches the engine's resolver, which treats
/// `--` as ordinary content outside of ODF class blocks.
#[must_use]
pub fn strip_slash_comment(line: &str) -> &str {
    let end = line.find("//").unwrap_or(line.len());
    line[..end].trim()
}

/// Streaming classifier over one ODF source
///
/// Lazy, finite and single-pass; callers re-parse the source to scan again.
/// Comment-only and blank lines produce no event. Assignments are only
/// recognized once a section header has been seen, matching how the game
/// engine skips file preambles.
pub struct OdfParser<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    seen_header: bool,
}

impl<'a> OdfParser<'a> {
    /// Create a parser over one file's text
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self {
            lines: source.lines().enumerate(),
            seen_header: false,
        }
    }
}

impl<'a> Iterator for OdfParser<'a> {
    type Item = OdfEvent<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        for (idx, raw) in self.lines.by_ref() {
            let line = strip_comment(raw);
            if line.is_empty() {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                self.seen_header = true;
                return Some(OdfEvent::SectionHeader {
                    name: &line[1..line.len() - 1],
                    line: idx + 1,
                });
            }

            if self.seen_header
                && let Some(eq) = line.find('=')
            {
                return Some(OdfEvent::Assignment {
                    key: line[..eq].trim(),
                    value: line[eq + 1..].trim(),
                    line: idx + 1,
                });
            }

            // Free text outside any section (or a non-assignment line): ignored.
        }
        None
    }
}
