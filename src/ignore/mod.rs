//! Ignore-rule evaluation engine
//!
//! `IgnorePolicy` is the single exclusion predicate applied during file
//! discovery. It combines four independent checks: directory-name membership,
//! file-name rules, known-binary extensions, and compiled gitignore rules
//! (last matching rule wins, `!` rules re-include). The policy is built once
//! per run and shared read-only across all workers.

pub mod defaults;
pub mod pattern;
pub mod profile;

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;

pub use pattern::IgnoreRule;
pub use profile::WebProfile;

/// Source tables for a policy. `Default` carries the built-in noise filters;
/// tests supply their own isolated tables.
#[derive(Debug, Clone)]
pub struct PolicyTables {
    pub directories: Vec<String>,
    pub files: Vec<String>,
    pub binary_extensions: Vec<String>,
}

impl Default for PolicyTables {
    fn default() -> Self {
        Self {
            directories: to_owned(defaults::IGNORED_DIRECTORIES),
            files: to_owned(defaults::IGNORED_FILES),
            binary_extensions: to_owned(defaults::BINARY_EXTENSIONS),
        }
    }
}

impl PolicyTables {
    /// Empty tables, for policies driven purely by gitignore rules.
    pub fn empty() -> Self {
        Self {
            directories: Vec::new(),
            files: Vec::new(),
            binary_extensions: Vec::new(),
        }
    }
}

fn to_owned(table: &[&str]) -> Vec<String> {
    table.iter().map(|s| s.to_string()).collect()
}

/// A file-name rule: exact name or `*.suffix` wildcard, both case-insensitive.
#[derive(Debug, Clone)]
enum FileRule {
    Exact(String),
    Suffix(String),
}

impl FileRule {
    fn parse(raw: &str) -> FileRule {
        let lower = raw.to_lowercase();
        match lower.strip_prefix('*') {
            Some(suffix) if !suffix.is_empty() => FileRule::Suffix(suffix.to_string()),
            _ => FileRule::Exact(lower),
        }
    }

    fn matches(&self, file_name_lower: &str) -> bool {
        match self {
            FileRule::Exact(name) => file_name_lower == name,
            FileRule::Suffix(suffix) => file_name_lower.ends_with(suffix.as_str()),
        }
    }
}

/// Immutable aggregate of every exclusion source for one run.
#[derive(Debug)]
pub struct IgnorePolicy {
    directories: HashSet<String>,
    file_rules: Vec<FileRule>,
    binary_extensions: HashSet<String>,
    gitignore: Vec<IgnoreRule>,
    profile: Option<WebProfile>,
}

impl IgnorePolicy {
    pub fn new(tables: PolicyTables) -> Self {
        Self {
            directories: tables.directories.iter().map(|d| d.to_lowercase()).collect(),
            file_rules: tables.files.iter().map(|f| FileRule::parse(f)).collect(),
            binary_extensions: tables
                .binary_extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect(),
            gitignore: Vec::new(),
            profile: None,
        }
    }

    /// Merge user-supplied additions into the directory and file sets.
    pub fn add_directories<I: IntoIterator<Item = String>>(&mut self, dirs: I) {
        self.directories.extend(dirs.into_iter().map(|d| d.to_lowercase()));
    }

    pub fn add_files<I: IntoIterator<Item = String>>(&mut self, files: I) {
        self.file_rules.extend(files.into_iter().map(|f| FileRule::parse(&f)));
    }

    /// Compile gitignore-style lines in order. Blank and `#` comment lines are
    /// skipped; lines that fail to compile become no-op rules.
    pub fn add_rules<'a, I: IntoIterator<Item = &'a str>>(&mut self, lines: I) {
        for line in lines {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some(rule) = IgnoreRule::compile(line) {
                self.gitignore.push(rule);
            }
        }
    }

    /// Load and compile `.gitignore` from the root, if present. Returns the
    /// number of usable rules.
    pub fn load_gitignore(&mut self, root: &Path) -> Result<usize> {
        let path = root.join(".gitignore");
        if !path.exists() {
            return Ok(0);
        }
        let before = self.gitignore.len();
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        self.add_rules(content.lines());
        Ok(self.gitignore.len() - before)
    }

    /// Activate a secondary web-project exclusion layer. The layer composes
    /// with the base policy, it never replaces it.
    pub fn set_profile(&mut self, profile: WebProfile) {
        self.directories
            .extend(profile.extra_directories().iter().map(|d| d.to_lowercase()));
        self.file_rules
            .extend(profile.extra_files().iter().map(|f| FileRule::parse(f)));
        self.profile = Some(profile);
    }

    pub fn has_profile(&self) -> bool {
        self.profile.is_some()
    }

    pub fn rule_count(&self) -> usize {
        self.gitignore.len()
    }

    /// The exclusion predicate. `relative_path` is root-relative with `/`
    /// separators, `extension` is lowercase without the dot.
    ///
    /// Directory, file-name, binary and profile checks are each sufficient to
    /// exclude and cannot be negated; the gitignore verdict is the outcome of
    /// the last matching rule in source order.
    pub fn is_excluded(&self, relative_path: &str, file_name: &str, extension: &str) -> bool {
        if self.binary_extensions.contains(extension) {
            return true;
        }

        if relative_path
            .split('/')
            .any(|segment| self.directories.contains(&segment.to_lowercase()))
        {
            return true;
        }

        let file_name_lower = file_name.to_lowercase();
        if self.file_rules.iter().any(|r| r.matches(&file_name_lower)) {
            return true;
        }

        if let Some(profile) = &self.profile {
            if profile.is_excluded(relative_path, file_name, extension) {
                return true;
            }
        }

        self.gitignore_verdict(relative_path).unwrap_or(false)
    }

    /// Last-match-wins gitignore evaluation: `Some(true)` excluded,
    /// `Some(false)` re-included by a negation, `None` when no rule matched.
    fn gitignore_verdict(&self, relative_path: &str) -> Option<bool> {
        let mut verdict = None;
        for rule in &self.gitignore {
            if rule.matches(relative_path) {
                verdict = Some(!rule.negated);
            }
        }
        verdict
    }
}

impl Default for IgnorePolicy {
    fn default() -> Self {
        Self::new(PolicyTables::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gitignore_only(lines: &[&str]) -> IgnorePolicy {
        let mut policy = IgnorePolicy::new(PolicyTables::empty());
        policy.add_rules(lines.iter().copied());
        policy
    }

    #[test]
    fn test_vcs_and_dependency_directories_always_excluded() {
        let policy = IgnorePolicy::default();
        assert!(policy.is_excluded(".git/config", "config", ""));
        assert!(policy.is_excluded("web/node_modules/pkg/index.js", "index.js", "js"));
        assert!(policy.is_excluded("bin/Debug/app.json", "app.json", "json"));
        assert!(!policy.is_excluded("src/main.rs", "main.rs", "rs"));
    }

    #[test]
    fn test_directory_match_is_whole_segment_only() {
        let policy = IgnorePolicy::default();
        // "binary" contains "bin" but is not the segment "bin"
        assert!(!policy.is_excluded("binary/data.txt", "data.txt", "txt"));
        assert!(policy.is_excluded("src/bin/data.txt", "data.txt", "txt"));
    }

    #[test]
    fn test_file_rules_exact_and_suffix() {
        let policy = IgnorePolicy::default();
        assert!(policy.is_excluded("yarn.lock", "yarn.lock", "lock"));
        assert!(policy.is_excluded("src/editor.swp", "editor.swp", "swp"));
        assert!(!policy.is_excluded("src/locker.rs", "locker.rs", "rs"));
    }

    #[test]
    fn test_binary_extensions_survive_negation() {
        let mut policy = IgnorePolicy::default();
        policy.add_rules(["!logo.png"]);
        assert!(policy.is_excluded("assets/logo.png", "logo.png", "png"));
    }

    #[test]
    fn test_gitignore_last_match_wins() {
        let policy = gitignore_only(&["*.log", "!important.log"]);
        assert!(policy.is_excluded("debug.log", "debug.log", "log"));
        assert!(!policy.is_excluded("important.log", "important.log", "log"));

        // Reversed order: the exclusion comes last and wins again.
        let policy = gitignore_only(&["!important.log", "*.log"]);
        assert!(policy.is_excluded("important.log", "important.log", "log"));
    }

    #[test]
    fn test_anchored_rule_spares_nested_directory() {
        let policy = gitignore_only(&["/build/"]);
        assert!(policy.is_excluded("build/main.o", "main.o", "o"));
        assert!(!policy.is_excluded("src/build/main.o", "main.o", "o"));
    }

    #[test]
    fn test_comment_and_blank_lines_are_skipped() {
        let policy = gitignore_only(&["# comment", "", "   ", "*.log"]);
        assert_eq!(policy.rule_count(), 1);
    }

    #[test]
    fn test_user_additions_extend_base_sets() {
        let mut policy = IgnorePolicy::new(PolicyTables::empty());
        policy.add_directories(["Generated".to_string()]);
        policy.add_files(["*.orig".to_string()]);
        assert!(policy.is_excluded("generated/x.cs", "x.cs", "cs"));
        assert!(policy.is_excluded("src/a.cs.orig", "a.cs.orig", "orig"));
        assert!(!policy.is_excluded("src/a.cs", "a.cs", "cs"));
    }
}
