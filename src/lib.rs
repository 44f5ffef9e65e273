//! # codepack - LLM-Ready Source Tree Compaction
//!
//! codepack walks a source tree, drops the noise (build artifacts,
//! dependencies, binaries, `.gitignore`d paths), strips comments and
//! insignificant whitespace in parallel, and writes one compacted,
//! token-budgeted artifact suitable for an LLM context window.
//!
//! ## Quick Start
//!
//! ```bash
//! # Compact a project into context.txt
//! codepack ./my-project ./context.txt
//!
//! # JSON output under a tighter budget
//! codepack ./my-project ./context.json --format structured --max-tokens 100000
//! ```

pub mod cli;
pub mod discovery;
pub mod ignore;
pub mod metadata;
pub mod normalize;
pub mod pipeline;
pub mod render;

pub use cli::{Cli, Output};
pub use ignore::IgnorePolicy;

/// Result type alias for codepack operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
