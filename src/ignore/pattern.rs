//! Gitignore pattern compilation
//!
//! Translates one gitignore-style pattern line into a compiled regex matcher
//! over root-relative, forward-slash paths. This is a best-effort subset of
//! gitignore syntax: `*`, `**`, leading `/` anchors, trailing `/` directory
//! rules and `!` negation are supported; character classes (`[abc]`) and `?`
//! are escaped literally and carry no glob meaning.

use regex::Regex;

/// One compiled ignore rule. Immutable after compilation; rules keep their
/// source-order position so negation can override earlier matches.
#[derive(Debug)]
pub struct IgnoreRule {
    /// Original pattern line, negation marker included
    pub pattern: String,
    /// Rule started with `!` (a match re-includes the path)
    pub negated: bool,
    /// Rule started with `/` (matches only from the tree root)
    pub anchored: bool,
    /// Rule ended with `/` (matches the directory and everything beneath)
    pub dir_only: bool,
    regex: Regex,
}

impl IgnoreRule {
    /// Compile a single non-blank, non-comment gitignore line.
    ///
    /// Returns `None` when the line cannot be turned into a usable matcher;
    /// malformed rules are treated as no-ops rather than aborting rule loading.
    pub fn compile(line: &str) -> Option<IgnoreRule> {
        let negated = line.starts_with('!');
        let body = if negated { &line[1..] } else { line };

        let anchored = body.starts_with('/');
        let body = if anchored { &body[1..] } else { body };
        let dir_only = body.ends_with('/');

        if body.is_empty() {
            return None;
        }

        let translated = translate(body, anchored, dir_only);
        match Regex::new(&translated) {
            Ok(regex) => Some(IgnoreRule {
                pattern: line.to_string(),
                negated,
                anchored,
                dir_only,
                regex,
            }),
            Err(e) => {
                tracing::debug!("skipping unusable ignore pattern {:?}: {}", line, e);
                None
            }
        }
    }

    /// Test the rule against a root-relative, `/`-separated path.
    pub fn matches(&self, relative_path: &str) -> bool {
        self.regex.is_match(relative_path)
    }
}

/// Translate an ignore pattern body (negation and leading `/` already
/// stripped) into a regex string.
///
/// Every regex-significant character except `*` and `/` is escaped. `**/`
/// becomes `(.*/)?` so it also matches zero leading segments, any other `**`
/// becomes `.*`, and a lone `*` becomes `[^/]*` (one path segment). Anchored
/// patterns match only from the start of the path; unanchored ones may match
/// at any depth, which also gives bare basenames their any-depth semantics.
fn translate(pattern: &str, anchored: bool, dir_only: bool) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut body = String::with_capacity(pattern.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '*' if chars.get(i + 1) == Some(&'*') => {
                if chars.get(i + 2) == Some(&'/') {
                    body.push_str("(.*/)?");
                    i += 3;
                } else {
                    body.push_str(".*");
                    i += 2;
                }
            }
            '*' => {
                body.push_str("[^/]*");
                i += 1;
            }
            '/' => {
                body.push('/');
                i += 1;
            }
            c => {
                body.push_str(&regex::escape(&c.to_string()));
                i += 1;
            }
        }
    }

    // A directory rule matches everything beneath the named directory; the
    // trailing separator is already part of the body.
    if dir_only {
        body.push_str(".*");
    }

    if anchored {
        format!("^{}", body)
    } else {
        format!("^(.*/)?({})", body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(line: &str) -> IgnoreRule {
        IgnoreRule::compile(line).expect("pattern should compile")
    }

    #[test]
    fn test_basename_pattern_matches_at_any_depth() {
        let r = rule("*.log");
        assert!(!r.negated);
        assert!(r.matches("debug.log"));
        assert!(r.matches("logs/debug.log"));
        assert!(r.matches("a/b/c/debug.log"));
        assert!(!r.matches("debug.txt"));
    }

    #[test]
    fn test_negated_pattern_keeps_flag_and_matches() {
        let r = rule("!important.log");
        assert!(r.negated);
        assert!(r.matches("important.log"));
        assert!(r.matches("sub/important.log"));
    }

    #[test]
    fn test_anchored_directory_rule_only_matches_top_level() {
        let r = rule("/build/");
        assert!(r.anchored);
        assert!(r.dir_only);
        assert!(r.matches("build/output.o"));
        assert!(r.matches("build/sub/output.o"));
        assert!(!r.matches("src/build/output.o"));
    }

    #[test]
    fn test_unanchored_directory_rule_matches_anywhere() {
        let r = rule("bin/");
        assert!(r.matches("bin/Debug/a.dll"));
        assert!(r.matches("src/bin/a.dll"));
        assert!(!r.matches("cabin/a.dll"));
    }

    #[test]
    fn test_double_star_prefix_matches_every_depth() {
        let r = rule("**/*.tmp");
        assert!(r.matches("a.tmp"));
        assert!(r.matches("dir/a.tmp"));
        assert!(r.matches("dir/sub/a.tmp"));
        assert!(!r.matches("a.txt"));
    }

    #[test]
    fn test_double_star_inside_pattern_spans_segments() {
        let r = rule("docs/**/draft.md");
        assert!(r.matches("docs/draft.md"));
        assert!(r.matches("docs/2024/q1/draft.md"));
        assert!(!r.matches("notes/draft.md"));
    }

    #[test]
    fn test_single_star_stays_within_one_segment() {
        let r = rule("/src/*.rs");
        assert!(r.matches("src/main.rs"));
        assert!(!r.matches("src/bin/extra.rs"));
    }

    #[test]
    fn test_metacharacters_are_escaped_literally() {
        let r = rule("file(1).txt");
        assert!(r.matches("file(1).txt"));
        assert!(!r.matches("file1.txt"));

        // Character classes carry no glob meaning in this subset.
        let r = rule("file[ab].txt");
        assert!(r.matches("file[ab].txt"));
        assert!(!r.matches("filea.txt"));
    }

    #[test]
    fn test_degenerate_patterns_are_rejected() {
        assert!(IgnoreRule::compile("!").is_none());
        assert!(IgnoreRule::compile("/").is_none());
    }
}
