//! Output rendering
//!
//! Serializes the final record set into the requested encoding. All
//! encodings share the analysis header; the text encodings introduce every
//! file with a path header, the structured encoding is pretty-printed JSON.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::ValueEnum;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::metadata::ProjectStructure;
use crate::pipeline::types::{FileCategory, FileRecord};

/// How many directory-sketch lines the header shows.
const MAX_SKETCH_LINES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Files grouped by category with section delimiters
    Grouped,
    /// Simple linear file listing
    Flat,
    /// JSON for programmatic consumption
    Structured,
}

#[derive(Serialize)]
struct StructuredOutput<'a> {
    files: &'a [FileRecord],
}

/// Write the final artifact. An unwritable output is the only failure mode
/// that surfaces from rendering.
pub fn write_output(
    path: &Path,
    records: &[FileRecord],
    metadata: Option<&ProjectStructure>,
    format: OutputFormat,
    web_project: bool,
) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let mut w = BufWriter::new(file);

    let total_tokens: usize = records.iter().map(|r| r.tokens).sum();

    writeln!(w, "# PROJECT ANALYSIS")?;
    writeln!(w, "Generated: {}", Utc::now().format("%Y-%m-%d %H:%M:%S UTC"))?;
    writeln!(w, "Files: {}", records.len())?;
    writeln!(w, "Estimated Tokens: {}", total_tokens)?;
    if web_project {
        writeln!(w, "Project Type: Blazor Application")?;
    }

    if let Some(structure) = metadata {
        write_metadata(&mut w, structure)?;
    }

    writeln!(w, "\n## FILE CONTENTS")?;

    match format {
        OutputFormat::Grouped => write_grouped(&mut w, records)?,
        OutputFormat::Flat => write_flat(&mut w, records)?,
        OutputFormat::Structured => write_structured(&mut w, records)?,
    }

    w.flush().context("Failed to flush output file")?;
    Ok(())
}

fn write_metadata<W: Write>(w: &mut W, structure: &ProjectStructure) -> Result<()> {
    writeln!(w, "\n## PROJECT STRUCTURE")?;
    writeln!(w, "Name: {}", structure.name)?;
    writeln!(w, "Type: {}", structure.kind)?;

    if !structure.dependencies.is_empty() {
        writeln!(w, "Dependencies: {}", structure.dependencies.join(", "))?;
    }

    if !structure.directories.is_empty() {
        writeln!(w, "\n### Directory Structure:")?;
        for (dir, count) in structure.directories.iter().take(MAX_SKETCH_LINES) {
            writeln!(w, "- {}/ ({} files)", dir, count)?;
        }
    }

    Ok(())
}

fn write_grouped<W: Write>(w: &mut W, records: &[FileRecord]) -> Result<()> {
    for category in FileCategory::all() {
        let in_category: Vec<&FileRecord> =
            records.iter().filter(|r| r.category == *category).collect();
        if in_category.is_empty() {
            continue;
        }

        writeln!(w, "\n=== {} FILES ===", category.label())?;
        for record in in_category {
            write_record(w, record)?;
        }
    }
    Ok(())
}

fn write_flat<W: Write>(w: &mut W, records: &[FileRecord]) -> Result<()> {
    for record in records {
        write_record(w, record)?;
    }
    Ok(())
}

fn write_record<W: Write>(w: &mut W, record: &FileRecord) -> Result<()> {
    writeln!(w, "--- {} ---", record.path)?;
    writeln!(w, "{}", record.content)?;
    Ok(())
}

fn write_structured<W: Write>(w: &mut W, records: &[FileRecord]) -> Result<()> {
    let output = StructuredOutput { files: records };
    serde_json::to_writer_pretty(&mut *w, &output).context("Failed to serialize output")?;
    writeln!(w)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(path: &str, category: FileCategory, content: &str) -> FileRecord {
        FileRecord {
            path: path.to_string(),
            extension: path.rsplit('.').next().unwrap_or_default().to_string(),
            category,
            tokens: content.len() / 4,
            content: content.to_string(),
        }
    }

    #[test]
    fn test_grouped_output_has_sections_and_path_headers() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out.txt");
        let records = vec![
            record("app.csproj", FileCategory::Configuration, "<Project/>"),
            record("src/a.cs", FileCategory::Source, "class A {}"),
        ];

        write_output(&out, &records, None, OutputFormat::Grouped, false).unwrap();
        let text = std::fs::read_to_string(&out).unwrap();

        assert!(text.contains("# PROJECT ANALYSIS"));
        assert!(text.contains("=== CONFIGURATION FILES ==="));
        assert!(text.contains("=== SOURCE FILES ==="));
        assert!(text.contains("--- src/a.cs ---"));
        assert!(text.contains("class A {}"));
        // Configuration section comes before source
        assert!(
            text.find("=== CONFIGURATION FILES ===").unwrap()
                < text.find("=== SOURCE FILES ===").unwrap()
        );
    }

    #[test]
    fn test_flat_output_preserves_record_order() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out.txt");
        let records = vec![
            record("b.cs", FileCategory::Source, "B"),
            record("a.cs", FileCategory::Source, "A"),
        ];

        write_output(&out, &records, None, OutputFormat::Flat, false).unwrap();
        let text = std::fs::read_to_string(&out).unwrap();
        assert!(text.find("--- b.cs ---").unwrap() < text.find("--- a.cs ---").unwrap());
    }

    #[test]
    fn test_structured_output_is_valid_json() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out.txt");
        let records = vec![record("src/a.cs", FileCategory::Source, "class A {}")];

        write_output(&out, &records, None, OutputFormat::Structured, false).unwrap();
        let text = std::fs::read_to_string(&out).unwrap();
        let json_start = text.find('{').unwrap();
        let value: serde_json::Value = serde_json::from_str(&text[json_start..]).unwrap();
        assert_eq!(value["files"][0]["path"], "src/a.cs");
        assert_eq!(value["files"][0]["category"], "Source");
    }

    #[test]
    fn test_unwritable_output_is_error() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("missing-dir").join("out.txt");
        assert!(write_output(&out, &[], None, OutputFormat::Flat, false).is_err());
    }
}
