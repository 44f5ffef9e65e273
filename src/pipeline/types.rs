//! Record types shared across the discovery/normalization pipeline

use serde::Serialize;
use std::path::PathBuf;

/// Output priority order: project structure first, data files last.
/// The discriminant doubles as the category's sort priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum FileCategory {
    Configuration,
    Source,
    Markup,
    Style,
    Script,
    Documentation,
    Data,
}

impl FileCategory {
    /// Map a lowercase, dot-free extension to its category. Unrecognized
    /// extensions are treated as source code.
    pub fn from_extension(extension: &str) -> FileCategory {
        match extension {
            "json" | "xml" | "yaml" | "yml" | "toml" | "csproj" | "sln" | "props" | "targets" => {
                FileCategory::Configuration
            }
            "razor" | "cshtml" | "html" | "htm" => FileCategory::Markup,
            "css" | "scss" | "less" => FileCategory::Style,
            "js" | "ts" | "jsx" | "tsx" => FileCategory::Script,
            "md" | "txt" | "rst" => FileCategory::Documentation,
            "sql" => FileCategory::Data,
            _ => FileCategory::Source,
        }
    }

    pub fn priority(self) -> usize {
        self as usize
    }

    /// Section label used by the grouped output encoding.
    pub fn label(self) -> &'static str {
        match self {
            FileCategory::Configuration => "CONFIGURATION",
            FileCategory::Source => "SOURCE",
            FileCategory::Markup => "MARKUP",
            FileCategory::Style => "STYLE",
            FileCategory::Script => "SCRIPT",
            FileCategory::Documentation => "DOCUMENTATION",
            FileCategory::Data => "DATA",
        }
    }

    pub fn all() -> &'static [FileCategory] {
        &[
            FileCategory::Configuration,
            FileCategory::Source,
            FileCategory::Markup,
            FileCategory::Style,
            FileCategory::Script,
            FileCategory::Documentation,
            FileCategory::Data,
        ]
    }
}

/// A path that survived the ignore policy and awaits normalization.
/// Produced by discovery, consumed exactly once by a worker.
#[derive(Debug, Clone)]
pub struct CandidateFile {
    /// Absolute path on disk
    pub path: PathBuf,
    /// Root-relative path, `/`-separated on every platform
    pub relative_path: String,
    pub file_name: String,
    /// Lowercase extension without the dot, empty when absent
    pub extension: String,
}

/// One normalized file, never mutated after creation.
#[derive(Debug, Clone, Serialize)]
pub struct FileRecord {
    pub path: String,
    pub extension: String,
    pub category: FileCategory,
    /// Rough token estimate: 1 token per 4 characters of compacted content
    pub tokens: usize,
    pub content: String,
}

/// Counters reported at the end of a run.
#[derive(Debug, Default)]
pub struct RunStats {
    pub files_discovered: usize,
    pub files_emitted: usize,
    pub files_processed: usize,
    pub files_skipped: usize,
    pub files_trimmed: usize,
    pub token_estimate: usize,
    pub duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_mapping() {
        assert_eq!(FileCategory::from_extension("cs"), FileCategory::Source);
        assert_eq!(FileCategory::from_extension("csproj"), FileCategory::Configuration);
        assert_eq!(FileCategory::from_extension("razor"), FileCategory::Markup);
        assert_eq!(FileCategory::from_extension("scss"), FileCategory::Style);
        assert_eq!(FileCategory::from_extension("tsx"), FileCategory::Script);
        assert_eq!(FileCategory::from_extension("md"), FileCategory::Documentation);
        assert_eq!(FileCategory::from_extension("sql"), FileCategory::Data);
        // Unknown extensions default to source
        assert_eq!(FileCategory::from_extension("zig"), FileCategory::Source);
    }

    #[test]
    fn test_priority_follows_declaration_order() {
        assert!(FileCategory::Configuration.priority() < FileCategory::Source.priority());
        assert!(FileCategory::Documentation.priority() < FileCategory::Data.priority());
    }
}
