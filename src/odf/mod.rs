//! ODF description format: parsing, schema loading, validation, repair
//!
//! ODF ("object definition file") is the game's line-oriented key/value
//! format for units, weapons and props. This module owns everything that
//! understands its syntax: the record parser, the schema built from the
//! auxiliary header/parameter lists, the validator that checks every
//! description in a mod tree, and the missing-field quick fix.

pub mod parser;
pub mod quick_fix;
pub mod schema;
pub mod validator;

pub use parser::{OdfEvent, OdfParser, strip_comment, strip_slash_comment};
pub use quick_fix::apply_quick_fixes;
pub use schema::{OdfSchema, SchemaLocations, HEADER_LIST_FILE, PARAMS_FILE};
pub use validator::{check_description_source, check_descriptions, find_description_files};
