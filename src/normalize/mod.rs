//! Content normalization
//!
//! Turns one file's raw text into a compacted blob: strip comments for the
//! file's language, trim every line, drop blank lines, and join what remains.
//! Structured-looking content (first line starting with `<` or `{`) is
//! concatenated without separators; everything else keeps line breaks. An
//! empty result means the file carried no signal and should be skipped.

pub mod languages;

use anyhow::{Context, Result};
use std::path::Path;

/// Read and compact a file. I/O failures propagate so the caller can log the
/// offending path and move on; they never abort the run.
pub fn normalize_file(path: &Path, extension: &str) -> Result<String> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    Ok(compact(&content, extension))
}

/// Compact already-loaded content. Idempotent: feeding the output back in
/// yields the same string.
pub fn compact(content: &str, extension: &str) -> String {
    let stripped = languages::strip_comments(content, extension);

    let lines: Vec<&str> = stripped
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        return String::new();
    }

    // Markup/JSON heuristic: structured content collapses tightest.
    if lines[0].starts_with('<') || lines[0].starts_with('{') {
        lines.concat()
    } else {
        lines.join("\n")
    }
}

/// Rough LLM token estimate: 1 token per 4 characters of code.
pub fn estimate_tokens(content: &str) -> usize {
    content.len() / 4
}
