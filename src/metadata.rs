//! Project structure analysis
//!
//! Best-effort metadata for the output header: project name, flavor, package
//! references and a bounded directory sketch, read from a top-level
//! `.csproj`. Every failure here degrades to "no metadata section"; it never
//! fails the run.

use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;
use walkdir::WalkDir;

use crate::ignore::IgnorePolicy;

/// How many directories and files-per-directory the sketch may carry.
const MAX_DIRECTORIES: usize = 50;
const MAX_FILES_PER_DIRECTORY: usize = 20;

lazy_static! {
    static ref PACKAGE_REFERENCE: Regex =
        Regex::new(r#"<PackageReference\s+Include="([^"]+)""#).unwrap();
}

#[derive(Debug)]
pub struct ProjectStructure {
    pub name: String,
    pub kind: String,
    pub dependencies: Vec<String>,
    /// (relative directory, file count), discovery-bounded
    pub directories: Vec<(String, usize)>,
}

/// Analyze the root for a `.csproj`-described project. Returns `None` when
/// there is nothing to report.
pub fn analyze(root: &Path, policy: &IgnorePolicy) -> Option<ProjectStructure> {
    let project_file = std::fs::read_dir(root)
        .ok()?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .find(|p| p.extension().map(|e| e == "csproj").unwrap_or(false))?;

    let name = project_file.file_stem()?.to_string_lossy().to_string();
    let content = std::fs::read_to_string(&project_file).ok()?;

    let dependencies = PACKAGE_REFERENCE
        .captures_iter(&content)
        .map(|c| c[1].to_string())
        .collect();

    Some(ProjectStructure {
        name,
        kind: project_kind(&content).to_string(),
        dependencies,
        directories: directory_sketch(root, policy),
    })
}

fn project_kind(project_content: &str) -> &'static str {
    if project_content.contains("Microsoft.AspNetCore.Components.WebAssembly") {
        "Blazor WebAssembly"
    } else if project_content.contains("Microsoft.AspNetCore.Components") {
        "Blazor Server"
    } else if project_content.contains("Microsoft.AspNetCore") {
        "ASP.NET Core"
    } else if project_content.contains("Microsoft.WindowsDesktop.App") {
        "WPF/WinForms"
    } else if project_content.contains("Microsoft.NET.Sdk.Web") {
        "Web Application"
    } else {
        "Console/Library"
    }
}

/// Walk non-excluded directories and count their immediate non-binary files.
fn directory_sketch(root: &Path, policy: &IgnorePolicy) -> Vec<(String, usize)> {
    let mut sketch = Vec::new();

    for entry in WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir())
    {
        if sketch.len() >= MAX_DIRECTORIES {
            break;
        }

        let relative = match entry.path().strip_prefix(root) {
            Ok(rel) => rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/"),
            Err(_) => continue,
        };

        // Reuse the directory-segment rules to keep noise out of the sketch.
        let probe = format!("{}/x", relative);
        if policy.is_excluded(&probe, "x", "") {
            continue;
        }

        let count = std::fs::read_dir(entry.path())
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
                    .filter(|e| {
                        let ext = e
                            .path()
                            .extension()
                            .map(|x| x.to_string_lossy().to_lowercase())
                            .unwrap_or_default();
                        let name = e.file_name().to_string_lossy().to_string();
                        !policy.is_excluded(&format!("{}/{}", relative, name), &name, &ext)
                    })
                    .take(MAX_FILES_PER_DIRECTORY)
                    .count()
            })
            .unwrap_or(0);

        if count > 0 {
            sketch.push((relative, count));
        }
    }

    sketch
}
