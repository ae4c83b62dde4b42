//! # morphdb
//!
//! Spell morph database builder for SimulationCraft spell data dumps.
//!
//! A spell morph is an "Override Action Spell" effect: while some aura is up,
//! one ability replaces another on the action bar. This library provides
//! functionality to:
//! - Download the per-class spell data dumps published by SimC
//! - Scan a dump for override effects and turn them into [`SpellMorph`] records
//! - Render morphs as YAML, Markdown or a combined JSON database
//! - Drive the whole fetch, extract, format, write pipeline per class
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use morphdb::{HttpSource, OutputFormat, SIMC_BASE_URL};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = HttpSource::new(SIMC_BASE_URL);
//! let morphs = morphdb::process_class(&source, "evoker", Path::new("morphs"), OutputFormat::Yaml)?;
//!
//! for morph in &morphs {
//!     println!("{}", morph.rotation_usage);
//! }
//! # Ok(())
//! # }
//! ```

pub mod classes;
pub mod database;
pub mod extract;
pub mod fetch;
pub mod format;

#[doc(inline)]
pub use classes::{dump_url, is_known_class, title_case, CLASSES, SIMC_BASE_URL};
#[doc(inline)]
pub use database::{
    build_all, ensure_output_dir, process_class, write_combined, DatabaseError, MorphDatabase,
};
#[doc(inline)]
pub use extract::{parse_spell_morphs, SpellMorph};
#[doc(inline)]
pub use fetch::{fetch_or_empty, DumpSource, FetchError, HttpSource};
#[doc(inline)]
pub use format::{
    format_combined_json, format_combined_yaml, format_markdown, format_yaml, CombinedFormat,
    OutputFormat, Provenance,
};
