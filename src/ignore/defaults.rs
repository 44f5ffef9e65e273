//! Built-in exclusion tables
//!
//! Baseline noise filters applied to every run: dependency and build output
//! directories, tooling metadata files, and extensions that are known binary
//! formats. The tables are plain data; `IgnorePolicy` copies them into its
//! own sets so tests can construct isolated policies instead.

/// Directory names excluded wherever they appear as a path segment.
pub const IGNORED_DIRECTORIES: &[&str] = &[
    // Build output
    "bin", "obj", "dist", "build", "out", "publish",
    // Dependencies
    "packages", "node_modules", "bower_components", "jspm_packages", "typings",
    // Version control
    ".git", ".svn", ".hg",
    // IDE state
    ".vs", ".idea", ".vscode",
    // Scratch and logs
    "temp", "tmp", "cache", ".cache", "logs",
];

/// File names excluded everywhere. Entries of the form `*.suffix` match any
/// file name ending in that suffix.
pub const IGNORED_FILES: &[&str] = &[
    ".gitignore", ".gitattributes", ".gitmodules", ".gitkeep",
    ".npmrc", ".yarnrc", ".editorconfig", ".eslintrc", ".prettierrc",
    "package-lock.json", "yarn.lock", "pnpm-lock.yaml",
    ".DS_Store", "Thumbs.db", "desktop.ini",
    "*.tmp", "*.bak", "*.swp", "*.swo", "*.log",
    "*.pid", "*.seed", "*.pid.lock",
];

/// Extensions (lowercase, no dot) that are always treated as binary and
/// excluded regardless of every other rule, gitignore negation included.
pub const BINARY_EXTENSIONS: &[&str] = &[
    // Images
    "png", "jpg", "jpeg", "gif", "bmp", "ico", "svg", "webp",
    // Audio / video
    "mp3", "wav", "ogg", "flac", "aac", "mp4", "avi", "mkv", "mov", "wmv", "flv",
    // Archives
    "zip", "rar", "tar", "gz", "7z",
    // Executables and libraries
    "exe", "dll", "pdb", "so", "dylib", "lib", "wasm",
    // Office documents
    "doc", "docx", "xls", "xlsx", "ppt", "pptx", "pdf",
    // Fonts
    "ttf", "otf", "woff", "woff2", "eot",
    // Compiled resources and payload blobs
    "res", "resx", "blat", "dat", "br",
];
