//! Command handlers for morphdb CLI

use anyhow::{Context, Result};
use morphdb::{CombinedFormat, DumpSource, OutputFormat, CLASSES};
use std::path::Path;

use crate::cli::ClassSelection;

/// Handle `--list-classes`
pub fn list_classes() {
    for class in CLASSES {
        println!("{}", class);
    }
}

/// Build morph files for the selected classes, plus the combined file if requested
pub fn build(
    source: &dyn DumpSource,
    selection: &ClassSelection,
    out_dir: &Path,
    format: OutputFormat,
    combined: Option<CombinedFormat>,
) -> Result<()> {
    morphdb::ensure_output_dir(out_dir)?;

    match selection {
        ClassSelection::All => {
            tracing::info!("Processing all classes...");
            let db = morphdb::build_all(source, CLASSES, out_dir, format)
                .context("Failed to build morph database")?;

            if let Some(combined_format) = combined {
                morphdb::write_combined(&db, out_dir, combined_format, source)
                    .context("Failed to write combined database")?;
            }

            println!(
                "Found {} morphs across {} classes in {}",
                db.total_morphs(),
                db.len(),
                out_dir.display()
            );
        }

        ClassSelection::One(class) => {
            if combined.is_some() {
                tracing::warn!("--combined only applies with --all, ignoring");
            }

            let morphs = morphdb::process_class(source, class, out_dir, format)
                .with_context(|| format!("Failed to process {}", class))?;

            println!("Found {} morphs for {} in {}", morphs.len(), class, out_dir.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use morphdb::FetchError;

    /// Source that serves one evoker dump and fails everything else
    struct EvokerOnly;

    impl DumpSource for EvokerOnly {
        fn location(&self, class: &str) -> String {
            format!("test://{}.txt", class)
        }

        fn base_location(&self) -> String {
            "test://".to_string()
        }

        fn fetch(&self, class: &str) -> Result<String, FetchError> {
            if class == "evoker" {
                Ok("Name             : Azure Strike (id=212)\n\
                    #1 (id=1)        : Override Action Spell (332): Azure Sweep overrides Azure Strike\n"
                    .to_string())
            } else {
                Err(FetchError::Status {
                    url: self.location(class),
                    status: 500,
                })
            }
        }
    }

    #[test]
    fn test_build_all_with_combined() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("morph_database");

        build(
            &EvokerOnly,
            &ClassSelection::All,
            &out,
            OutputFormat::Markdown,
            Some(CombinedFormat::Json),
        )
        .unwrap();

        for class in CLASSES {
            assert!(out.join(format!("{class}_morphs.md")).exists());
        }
        let combined = std::fs::read_to_string(out.join("all_morphs.json")).unwrap();
        assert!(combined.contains("\"total_morphs\": 1"));
    }

    #[test]
    fn test_build_single_class_ignores_combined() {
        let dir = tempfile::tempdir().unwrap();

        build(
            &EvokerOnly,
            &ClassSelection::One("evoker".to_string()),
            dir.path(),
            OutputFormat::Yaml,
            Some(CombinedFormat::Yaml),
        )
        .unwrap();

        assert!(dir.path().join("evoker_morphs.yaml").exists());
        assert!(!dir.path().join("all_morphs.yaml").exists());
    }
}
