//! Workshop root configuration: INI parsing and content structure validation

pub mod ini;
pub mod validation;

pub use ini::{IniDocument, IniSection};
pub use validation::{
    ESSENTIAL_EXTENSIONS, OPTIONAL_MULTIPLAYER_EXTENSIONS, StructureReport, VALID_MAP_TYPES,
    find_config_file, validate_content_structure,
};
