//! Morph database assembly
//!
//! Drives fetch, extract, format and write for each class, and collects the
//! per-class results for the combined database file.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::classes::is_known_class;
use crate::extract::{parse_spell_morphs, SpellMorph};
use crate::fetch::{fetch_or_empty, DumpSource};
use crate::format::{
    format_combined_json, format_combined_yaml, CombinedFormat, OutputFormat, Provenance,
};

/// Base name of the combined database file
pub const COMBINED_FILE_STEM: &str = "all_morphs";

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("failed to create output directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Morphs for every processed class, in processing order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MorphDatabase {
    entries: Vec<(String, Vec<SpellMorph>)>,
}

impl MorphDatabase {
    /// Record a class's morphs, replacing any earlier entry for the class
    pub fn insert(&mut self, class: impl Into<String>, morphs: Vec<SpellMorph>) {
        let class = class.into();
        match self.entries.iter_mut().find(|(c, _)| *c == class) {
            Some((_, existing)) => *existing = morphs,
            None => self.entries.push((class, morphs)),
        }
    }

    pub fn get(&self, class: &str) -> Option<&[SpellMorph]> {
        self.entries
            .iter()
            .find(|(c, _)| c == class)
            .map(|(_, morphs)| morphs.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SpellMorph])> {
        self.entries
            .iter()
            .map(|(class, morphs)| (class.as_str(), morphs.as_slice()))
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(class, _)| class.as_str())
    }

    /// Sum of morph counts across all classes
    pub fn total_morphs(&self) -> usize {
        self.entries.iter().map(|(_, morphs)| morphs.len()).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Create the output directory if it doesn't exist
pub fn ensure_output_dir(dir: &Path) -> Result<(), DatabaseError> {
    fs::create_dir_all(dir).map_err(|source| DatabaseError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, contents: &str) -> Result<(), DatabaseError> {
    fs::write(path, contents).map_err(|source| DatabaseError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Path of a class's morph file, e.g. `evoker_morphs.yaml`
pub fn class_output_path(out_dir: &Path, class: &str, format: OutputFormat) -> PathBuf {
    out_dir.join(format!("{}_morphs.{}", class, format.extension()))
}

/// Process a single class and save its morph file. Returns the morphs found.
///
/// A failed download yields no morphs; the class file is still written with
/// its empty-result placeholder.
pub fn process_class(
    source: &dyn DumpSource,
    class: &str,
    out_dir: &Path,
    format: OutputFormat,
) -> Result<Vec<SpellMorph>, DatabaseError> {
    if !is_known_class(class) {
        tracing::warn!("{} is not a known class, trying anyway", class);
    }

    let content = fetch_or_empty(source, class);

    tracing::info!("Parsing {}...", class);
    let morphs = parse_spell_morphs(&content);
    tracing::info!("Found {} morphs for {}", morphs.len(), class);

    let provenance = Provenance::now(source.location(class));
    let output = format.render(&morphs, class, &provenance);

    let path = class_output_path(out_dir, class, format);
    write_file(&path, &output)?;
    tracing::info!("Saved to {}", path.display());

    Ok(morphs)
}

/// Process every class in order and collect the results.
///
/// Download failures never stop the run; only filesystem errors do.
pub fn build_all(
    source: &dyn DumpSource,
    classes: &[&str],
    out_dir: &Path,
    format: OutputFormat,
) -> Result<MorphDatabase, DatabaseError> {
    let mut db = MorphDatabase::default();

    for class in classes {
        let morphs = process_class(source, class, out_dir, format)?;
        db.insert(*class, morphs);
    }

    Ok(db)
}

/// Write the combined database file and return its path
pub fn write_combined(
    db: &MorphDatabase,
    out_dir: &Path,
    format: CombinedFormat,
    source: &dyn DumpSource,
) -> Result<PathBuf, DatabaseError> {
    let provenance = Provenance::now(source.base_location());

    let output = match format {
        CombinedFormat::Yaml => format_combined_yaml(db, &provenance),
        CombinedFormat::Json => format_combined_json(db, &provenance)?,
    };

    let path = out_dir.join(format!("{}.{}", COMBINED_FILE_STEM, format.extension()));
    write_file(&path, &output)?;
    tracing::info!("Combined database saved to {}", path.display());

    Ok(path)
}
