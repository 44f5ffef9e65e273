//! Web-project exclusion profile
//!
//! Blazor and ASP.NET trees carry a lot of generated client-side noise that
//! the generic tables miss: framework payloads under `wwwroot/`, minified
//! bundles, designer-generated sources, publish output. When such a project
//! is detected, this secondary layer composes with the base policy — extra
//! ignored directories and files, a whitelist of relevant extensions, and
//! regex detection of minified/generated file names.

use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;
use walkdir::WalkDir;

/// Simple directory names merged into the base segment check.
const PROFILE_DIRECTORIES: &[&str] = &[
    "sass-cache", ".sass-cache", "nuget", ".nuget",
    "clientbin", "generatedassets", "_bin_deployableassemblies",
];

/// Directory fragments matched as path substrings (they span two segments).
const PROFILE_DIRECTORY_FRAGMENTS: &[&str] = &[
    "wwwroot/lib", "wwwroot/_framework", "wwwroot/_content",
    "js/lib", "js/libs", "js/vendor",
];

/// File rules merged into the base file-name check.
const PROFILE_FILES: &[&str] = &[
    "*.min.css", "*.min.js", "*.bundle.js", "*.bundle.css",
    "blazor.boot.json", "blazor.webassembly.js", "dotnet.js", "dotnet.wasm",
    "*.nupkg", "*.snupkg", "*.nuspec", "packages.config", "packages.lock.json",
    "*.compiled.css", "*.generated.css", "*.scss.css", "*.less.css",
    "webpack.config.js", "rollup.config.js", "vite.config.js",
    "tsconfig.json", "jsconfig.json", "launchSettings.json",
    "*.pubxml", "*.pubxml.user", "*.dll.config", "*.exe.config",
    "*.runtimeconfig.json", "*.deps.json",
];

/// Only these extensions carry signal in a web project; everything else is
/// dropped while the profile is active.
const RELEVANT_EXTENSIONS: &[&str] = &[
    "cs", "razor", "cshtml", "csproj", "sln", "props", "targets",
    "json", "xml", "yaml", "yml", "css", "js", "html", "htm", "md", "txt", "rst",
];

/// Build/publish path fragments that are never relevant.
const DENY_PATH_FRAGMENTS: &[&str] = &["publish", "dist", "build", ".vs", "bin", "obj"];

/// Project markers looked for inside `.csproj` files.
const CSPROJ_MARKERS: &[&str] = &[
    "Microsoft.AspNetCore.Components",
    "Microsoft.AspNetCore.Components.WebAssembly",
    "Blazor",
    "Microsoft.NET.Sdk.BlazorWebAssembly",
    "Microsoft.NET.Sdk.Web",
];

/// Directories not worth walking during detection.
const DETECT_SKIP: &[&str] = &[".git", "node_modules", "bin", "obj", "packages"];

lazy_static! {
    static ref MINIFIED_FILE: Regex = Regex::new(r"(?i)\.min\.(js|css|html)$").unwrap();
    static ref GENERATED_FILE: Regex = Regex::new(r"(?i)\.(generated|g|designer)\.(cs|js|css)$").unwrap();
}

/// Secondary exclusion layer for detected Blazor/ASP.NET trees.
#[derive(Debug, Default)]
pub struct WebProfile;

impl WebProfile {
    /// Detect whether the tree looks like a Blazor/ASP.NET project: a
    /// `.csproj` carrying a known SDK or package marker, any `.razor` file,
    /// or a `wwwroot/index.html`.
    pub fn detect(root: &Path) -> Option<WebProfile> {
        let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
            let name = entry.file_name().to_string_lossy();
            !(entry.file_type().is_dir() && DETECT_SKIP.contains(&name.as_ref()))
        });

        for entry in walker.filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy();

            if name.ends_with(".razor") {
                return Some(WebProfile);
            }
            if name.ends_with(".csproj") {
                if let Ok(content) = std::fs::read_to_string(entry.path()) {
                    if CSPROJ_MARKERS.iter().any(|m| content.contains(m)) {
                        return Some(WebProfile);
                    }
                }
            }
            if name.eq_ignore_ascii_case("index.html")
                && entry
                    .path()
                    .parent()
                    .and_then(|p| p.file_name())
                    .map(|n| n.eq_ignore_ascii_case("wwwroot"))
                    .unwrap_or(false)
            {
                return Some(WebProfile);
            }
        }

        None
    }

    /// Simple directory names this profile adds to the base policy.
    pub fn extra_directories(&self) -> &'static [&'static str] {
        PROFILE_DIRECTORIES
    }

    /// File rules this profile adds to the base policy.
    pub fn extra_files(&self) -> &'static [&'static str] {
        PROFILE_FILES
    }

    /// Profile-specific exclusion checks, applied on top of the base policy.
    pub fn is_excluded(&self, relative_path: &str, file_name: &str, extension: &str) -> bool {
        if MINIFIED_FILE.is_match(file_name) || GENERATED_FILE.is_match(file_name) {
            return true;
        }

        let rel_lower = relative_path.to_lowercase();

        // Static web assets: only plain markup, styles and scripts survive.
        if rel_lower.starts_with("wwwroot/") || rel_lower.contains("/wwwroot/") {
            if !matches!(extension, "html" | "css" | "js") {
                return true;
            }
            if file_name.to_lowercase().contains(".min.") {
                return true;
            }
        }

        let padded = format!("/{}", rel_lower);
        if PROFILE_DIRECTORY_FRAGMENTS
            .iter()
            .any(|f| padded.contains(&format!("/{}/", f)))
        {
            return true;
        }

        if !RELEVANT_EXTENSIONS.contains(&extension) {
            return true;
        }

        DENY_PATH_FRAGMENTS
            .iter()
            .any(|f| padded.contains(&format!("/{}/", f)))
    }
}
