//! Language-specific comment stripping
//!
//! Extension → transform dispatch used by the normalizer. Each transform is a
//! small set of compiled regexes; new languages are added here without
//! touching the pipeline. The line-comment pattern deliberately refuses a
//! `//` preceded by `:` so URLs inside code survive.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref BLOCK_COMMENT: Regex = Regex::new(r"(?s)/\*.*?\*/").unwrap();
    static ref LINE_COMMENT: Regex = Regex::new(r"(?m)(^|[^:])//[^\n]*").unwrap();
    static ref DOC_COMMENT: Regex = Regex::new(r"(?m)^\s*///.*$").unwrap();
    static ref PRAGMA_DIRECTIVE: Regex = Regex::new(r"(?m)^\s*#pragma\s.*$").unwrap();
    static ref REGION_DIRECTIVE: Regex = Regex::new(r"(?m)^\s*#(region|endregion).*$").unwrap();
    static ref RAZOR_COMMENT: Regex = Regex::new(r"(?s)@\*.*?\*@").unwrap();
}

/// Apply the comment-stripping transform registered for an extension.
/// Unrecognized extensions pass through unchanged (identity transform).
pub fn strip_comments(content: &str, extension: &str) -> String {
    match extension {
        "cs" => strip_csharp(content),
        "razor" | "cshtml" => strip_razor(content),
        "js" | "ts" | "jsx" | "tsx" => strip_c_style(content),
        "css" | "scss" | "less" => strip_css(content),
        _ => content.to_string(),
    }
}

fn strip_c_style(content: &str) -> String {
    let content = BLOCK_COMMENT.replace_all(content, "");
    let content = DOC_COMMENT.replace_all(&content, "");
    LINE_COMMENT.replace_all(&content, "${1}").into_owned()
}

fn strip_csharp(content: &str) -> String {
    let content = strip_c_style(content);
    let content = PRAGMA_DIRECTIVE.replace_all(&content, "");
    REGION_DIRECTIVE.replace_all(&content, "").into_owned()
}

fn strip_razor(content: &str) -> String {
    let content = RAZOR_COMMENT.replace_all(content, "");
    strip_csharp(&content)
}

fn strip_css(content: &str) -> String {
    BLOCK_COMMENT.replace_all(content, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_comments_removed() {
        let input = "int x = 1; /* a\nmultiline\ncomment */ int y = 2;";
        let out = strip_comments(input, "cs");
        assert!(!out.contains("comment"));
        assert!(out.contains("int x = 1;"));
        assert!(out.contains("int y = 2;"));
    }

    #[test]
    fn test_line_comments_removed_urls_preserved() {
        let input = "let url = \"https://example.com\"; // trailing note";
        let out = strip_comments(input, "js");
        assert!(out.contains("https://example.com"));
        assert!(!out.contains("trailing note"));
    }

    #[test]
    fn test_line_comment_at_line_start() {
        let input = "// whole line comment\nlet a = 1;";
        let out = strip_comments(input, "ts");
        assert!(!out.contains("whole line"));
        assert!(out.contains("let a = 1;"));
    }

    #[test]
    fn test_csharp_doc_comments_and_directives() {
        let input = "/// <summary>Doc</summary>\n#pragma warning disable 1591\n#region Helpers\nvoid F() {}\n#endregion";
        let out = strip_comments(input, "cs");
        assert!(!out.contains("summary"));
        assert!(!out.contains("pragma"));
        assert!(!out.contains("region"));
        assert!(out.contains("void F() {}"));
    }

    #[test]
    fn test_razor_comments_removed() {
        let input = "@* server comment *@\n<h1>Title</h1>";
        let out = strip_comments(input, "razor");
        assert!(!out.contains("server comment"));
        assert!(out.contains("<h1>Title</h1>"));
    }

    #[test]
    fn test_css_block_comments_removed() {
        let input = "/* theme */\nbody { color: red; }";
        let out = strip_comments(input, "css");
        assert!(!out.contains("theme"));
        assert!(out.contains("body { color: red; }"));
    }

    #[test]
    fn test_unknown_extension_is_identity() {
        let input = "# not a comment to us\nkey: value";
        assert_eq!(strip_comments(input, "yaml"), input);
    }
}
