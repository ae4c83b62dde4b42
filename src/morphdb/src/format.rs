//! Output formatting for spell morphs
//!
//! Per-class documents are YAML or Markdown. The combined database over all
//! classes is YAML or JSON.

use std::fmt::Write;

use chrono::{DateTime, Local};
use serde::ser::{Serialize, Serializer};

use crate::classes::title_case;
use crate::database::MorphDatabase;
use crate::extract::SpellMorph;

/// Representation of a per-class morph file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Markdown,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Yaml => "yaml",
            OutputFormat::Markdown => "md",
        }
    }

    /// Render a class document in this representation
    pub fn render(self, morphs: &[SpellMorph], class: &str, provenance: &Provenance) -> String {
        match self {
            OutputFormat::Yaml => format_yaml(morphs, class, provenance),
            OutputFormat::Markdown => format_markdown(morphs, class, provenance),
        }
    }
}

/// Representation of the combined all-class database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CombinedFormat {
    #[default]
    Yaml,
    Json,
}

impl CombinedFormat {
    pub fn extension(self) -> &'static str {
        match self {
            CombinedFormat::Yaml => "yaml",
            CombinedFormat::Json => "json",
        }
    }
}

/// Where the data came from and when the document was generated
#[derive(Debug, Clone)]
pub struct Provenance {
    pub source: String,
    pub generated: DateTime<Local>,
}

impl Provenance {
    /// Provenance stamped with the current time
    pub fn now(source: impl Into<String>) -> Self {
        Provenance {
            source: source.into(),
            generated: Local::now(),
        }
    }

    /// ISO-8601 timestamp with microseconds
    pub fn timestamp(&self) -> String {
        self.generated.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

/// Format a class's morphs as a YAML document
pub fn format_yaml(morphs: &[SpellMorph], class: &str, provenance: &Provenance) -> String {
    let mut out = String::new();

    writeln!(out, "# {} Spell Morphs", title_case(class)).unwrap();
    writeln!(out, "# Auto-generated from SimC spell data dump").unwrap();
    writeln!(out, "# Source: {}", provenance.source).unwrap();
    writeln!(out, "# Generated: {}", provenance.timestamp()).unwrap();
    writeln!(out).unwrap();
    writeln!(out, "{}:", yaml_scalar(class)).unwrap();

    if morphs.is_empty() {
        writeln!(out, "  # No spell morphs found").unwrap();
        return out;
    }

    for morph in morphs {
        writeln!(out, "  # {} overrides {}", morph.override_spell, morph.base_spell).unwrap();
        writeln!(out, "  - override_spell: {}", yaml_scalar(&morph.override_spell)).unwrap();
        writeln!(out, "    override_id: {}", morph.override_spell_id).unwrap();
        writeln!(out, "    base_spell: {}", yaml_scalar(&morph.base_spell)).unwrap();
        if let Some(base_id) = morph.base_spell_id {
            writeln!(out, "    base_id: {}", base_id).unwrap();
        }
        writeln!(out, "    trigger: {}", yaml_scalar(&morph.trigger_condition())).unwrap();
        writeln!(out, "    usage: {}", yaml_scalar(&morph.rotation_usage)).unwrap();
        writeln!(out).unwrap();
    }

    out
}

/// Format a class's morphs as a Markdown table
pub fn format_markdown(morphs: &[SpellMorph], class: &str, provenance: &Provenance) -> String {
    let mut out = String::new();

    writeln!(out, "# {} Spell Morphs", title_case(class)).unwrap();
    writeln!(out).unwrap();
    writeln!(out, "Source: [SimC Spell Data Dump]({})", provenance.source).unwrap();
    writeln!(out, "Generated: {}", provenance.timestamp()).unwrap();
    writeln!(out).unwrap();

    if morphs.is_empty() {
        writeln!(out, "No spell morphs found for this class.").unwrap();
        return out;
    }

    writeln!(out, "| Override Spell | Base Spell | Buff Trigger | Rotation Usage |").unwrap();
    writeln!(out, "|----------------|------------|--------------|----------------|").unwrap();

    for morph in morphs {
        writeln!(
            out,
            "| {} | {} | `{}` | `{}` |",
            md_cell(&morph.override_spell),
            md_cell(&morph.base_spell),
            md_cell(&morph.trigger_condition()),
            md_cell(&morph.rotation_usage)
        )
        .unwrap();
    }

    out
}

/// Format the combined database as YAML with a metadata comment block
pub fn format_combined_yaml(db: &MorphDatabase, provenance: &Provenance) -> String {
    let mut out = String::new();

    writeln!(out, "# Combined Spell Morph Database").unwrap();
    writeln!(out, "# Source: {}", provenance.source).unwrap();
    writeln!(out, "# Generated: {}", provenance.timestamp()).unwrap();
    writeln!(out, "# Classes: {}", db.classes().collect::<Vec<_>>().join(", ")).unwrap();
    writeln!(out, "# Total morphs: {}", db.total_morphs()).unwrap();
    writeln!(out).unwrap();

    for (class, morphs) in db.iter() {
        writeln!(out, "{}:", yaml_scalar(class)).unwrap();

        if morphs.is_empty() {
            writeln!(out, "  []  # No morphs").unwrap();
        }

        for morph in morphs {
            writeln!(out, "  - override: {}", yaml_scalar(&morph.override_spell)).unwrap();
            writeln!(out, "    base: {}", yaml_scalar(&morph.base_spell)).unwrap();
            writeln!(out, "    trigger: {}", yaml_scalar(&morph.trigger_condition())).unwrap();
            writeln!(out, "    usage: {}", yaml_scalar(&morph.rotation_usage)).unwrap();
        }

        writeln!(out).unwrap();
    }

    out
}

#[derive(serde::Serialize)]
struct CombinedDatabase<'a> {
    meta: DatabaseMeta<'a>,
    morphs: MorphsByClass<'a>,
}

#[derive(serde::Serialize)]
struct DatabaseMeta<'a> {
    source: &'a str,
    generated: String,
    classes_processed: Vec<&'a str>,
    total_morphs: usize,
}

/// Class -> morphs map that keeps processing order
struct MorphsByClass<'a>(&'a MorphDatabase);

impl Serialize for MorphsByClass<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter())
    }
}

/// Format the combined database as pretty-printed JSON
pub fn format_combined_json(
    db: &MorphDatabase,
    provenance: &Provenance,
) -> Result<String, serde_json::Error> {
    let database = CombinedDatabase {
        meta: DatabaseMeta {
            source: &provenance.source,
            generated: provenance.timestamp(),
            classes_processed: db.classes().collect(),
            total_morphs: db.total_morphs(),
        },
        morphs: MorphsByClass(db),
    };

    serde_json::to_string_pretty(&database)
}

/// Render a string as a YAML scalar, quoted only when plain style would misparse
fn yaml_scalar(s: &str) -> String {
    match serde_yaml::to_string(s) {
        Ok(yaml) => yaml.trim_end_matches('\n').to_string(),
        // serde_yaml does not fail on plain strings; JSON strings are valid YAML
        Err(_) => serde_json::Value::from(s).to_string(),
    }
}

fn md_cell(s: &str) -> String {
    s.replace('|', "\\|")
}
