//! CLI argument definitions for morphdb

use clap::{Parser, ValueEnum};
use morphdb::{CombinedFormat, OutputFormat};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "morphdb")]
#[command(about = "Build spell morph database from SimC data dumps", long_about = None)]
pub struct Cli {
    /// Specific class to process (e.g. evoker, warrior)
    #[arg(short, long, value_name = "CLASS")]
    pub class: Option<String>,

    /// Process all classes
    #[arg(short, long)]
    pub all: bool,

    /// Output directory (default: morph_database)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format for individual files
    #[arg(short, long, value_enum, default_value_t = FileFormat::Yaml)]
    pub format: FileFormat,

    /// Also generate a combined database file (with --all)
    #[arg(long)]
    pub combined: bool,

    /// Format for combined database
    #[arg(long, value_enum, default_value_t = CombinedFileFormat::Yaml)]
    pub combined_format: CombinedFileFormat,

    /// Base URL of the spell data dumps
    #[arg(long, env = "MORPHDB_BASE_URL")]
    pub base_url: Option<String>,

    /// List known classes and exit
    #[arg(long)]
    pub list_classes: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FileFormat {
    Yaml,
    Markdown,
}

impl From<FileFormat> for OutputFormat {
    fn from(format: FileFormat) -> Self {
        match format {
            FileFormat::Yaml => OutputFormat::Yaml,
            FileFormat::Markdown => OutputFormat::Markdown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CombinedFileFormat {
    Yaml,
    Json,
}

impl From<CombinedFileFormat> for CombinedFormat {
    fn from(format: CombinedFileFormat) -> Self {
        match format {
            CombinedFileFormat::Yaml => CombinedFormat::Yaml,
            CombinedFileFormat::Json => CombinedFormat::Json,
        }
    }
}

/// Which classes a run covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassSelection {
    All,
    One(String),
}

impl Cli {
    /// `--all` wins over `--class`; `None` means nothing was selected.
    /// A blank `--class` counts as no selection.
    pub fn selection(&self) -> Option<ClassSelection> {
        if self.all {
            Some(ClassSelection::All)
        } else {
            self.class
                .as_deref()
                .map(str::trim)
                .filter(|class| !class.is_empty())
                .map(|class| ClassSelection::One(class.to_string()))
        }
    }
}
