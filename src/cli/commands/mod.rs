use std::path::{Path, PathBuf};

use clap::Subcommand;

pub mod assets;
pub mod legacy;
pub mod odf;
pub mod scan;
pub mod stats;
pub mod terrain;
pub mod workshop;

/// Expand `~` in a user-supplied path argument
pub(crate) fn expand_arg(path: &Path) -> PathBuf {
    crate::utils::expand(&path.to_string_lossy())
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full safety scan (structure, descriptions, assets, terrain)
    Scan {
        /// Path to the mod content folder
        #[arg(short, long)]
        source: PathBuf,

        /// Directory containing odfHeaderList.txt and bzrODFparams.txt
        /// (defaults to the executable's directory, then the platform data dir)
        #[arg(long)]
        schema_dir: Option<PathBuf>,

        /// Write the full report as JSON to this file
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// ODF description utilities (schema check, missing-field fix)
    Odf {
        #[command(subcommand)]
        command: OdfCommands,
    },

    /// Asset reference utilities
    Assets {
        #[command(subcommand)]
        command: AssetsCommands,
    },

    /// Terrain file utilities (defect check, repair)
    Terrain {
        #[command(subcommand)]
        command: TerrainCommands,
    },

    /// Workshop root configuration utilities
    Workshop {
        #[command(subcommand)]
        command: WorkshopCommands,
    },

    /// Analyze disk and estimated runtime footprint
    Stats {
        /// Path to the mod content folder
        #[arg(short, long)]
        source: PathBuf,
    },

    /// Legacy file utilities (.map leftovers)
    Legacy {
        #[command(subcommand)]
        command: LegacyCommands,
    },
}

/// ODF description commands
#[derive(Subcommand)]
pub enum OdfCommands {
    /// Validate every ODF file against the schema
    Check {
        /// Path to the mod content folder
        #[arg(short, long)]
        source: PathBuf,

        /// Directory containing the schema files
        #[arg(long)]
        schema_dir: Option<PathBuf>,
    },

    /// Apply automatic fixes for missing required fields
    Fix {
        /// Path to the mod content folder
        #[arg(short, long)]
        source: PathBuf,

        /// Directory containing the schema files
        #[arg(long)]
        schema_dir: Option<PathBuf>,
    },
}

/// Asset reference commands
#[derive(Subcommand)]
pub enum AssetsCommands {
    /// Report references that resolve to no file in the tree
    Check {
        /// Path to the mod content folder
        #[arg(short, long)]
        source: PathBuf,
    },
}

/// Terrain file commands
#[derive(Subcommand)]
pub enum TerrainCommands {
    /// Scan terrain files for line-ending and duplicate-section defects
    Check {
        /// Path to the mod content folder
        #[arg(short, long)]
        source: PathBuf,
    },

    /// Repair terrain file defects in place
    Fix {
        /// Path to the mod content folder
        #[arg(short, long)]
        source: PathBuf,

        /// Only normalize line endings
        #[arg(long)]
        endings: bool,

        /// Only remove duplicate [Size] sections
        #[arg(long)]
        duplicates: bool,
    },
}

/// Workshop configuration commands
#[derive(Subcommand)]
pub enum WorkshopCommands {
    /// Validate the root .ini configuration and its companion files
    Validate {
        /// Path to the mod content folder
        #[arg(short, long)]
        source: PathBuf,
    },
}

/// Legacy file commands
#[derive(Subcommand)]
pub enum LegacyCommands {
    /// List legacy .map files in the tree
    Find {
        /// Path to the mod content folder
        #[arg(short, long)]
        source: PathBuf,
    },

    /// Delete legacy .map files from the tree
    Clean {
        /// Path to the mod content folder
        #[arg(short, long)]
        source: PathBuf,
    },
}

impl Commands {
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Scan {
                source,
                schema_dir,
                json,
            } => scan::execute(source, schema_dir.as_deref(), json.as_deref()),
            Commands::Odf { command } => command.execute(),
            Commands::Assets { command } => command.execute(),
            Commands::Terrain { command } => command.execute(),
            Commands::Workshop { command } => command.execute(),
            Commands::Stats { source } => stats::execute(source),
            Commands::Legacy { command } => command.execute(),
        }
    }
}

impl OdfCommands {
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            OdfCommands::Check { source, schema_dir } => {
                odf::check(source, schema_dir.as_deref())
            }
            OdfCommands::Fix { source, schema_dir } => odf::fix(source, schema_dir.as_deref()),
        }
    }
}

impl AssetsCommands {
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            AssetsCommands::Check { source } => assets::check(source),
        }
    }
}

impl TerrainCommands {
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            TerrainCommands::Check { source } => terrain::check(source),
            TerrainCommands::Fix {
                source,
                endings,
                duplicates,
            } => terrain::fix(source, *endings, *duplicates),
        }
    }
}

impl WorkshopCommands {
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            WorkshopCommands::Validate { source } => workshop::validate(source),
        }
    }
}

impl LegacyCommands {
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            LegacyCommands::Find { source } => legacy::find(source),
            LegacyCommands::Clean { source } => legacy::clean(source),
        }
    }
}
