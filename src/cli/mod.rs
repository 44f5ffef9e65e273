//! Command-line interface for codepack
//!
//! Argument parsing with clap and the entry point that wires options into
//! the pipeline.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod output;

pub use output::Output;

use crate::pipeline::{self, PipelineOptions, DEFAULT_MAX_TOKENS};
use crate::render::OutputFormat;

/// codepack - Compact a source tree into a single LLM-ready context file
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root directory of the source tree to compact
    pub root: PathBuf,

    /// Output file to write
    pub output: PathBuf,

    /// Additional directory name to ignore (repeatable)
    #[arg(long = "ignore-dir", value_name = "DIR")]
    pub ignore_dirs: Vec<String>,

    /// Additional file name or *.suffix pattern to ignore (repeatable)
    #[arg(long = "ignore-file", value_name = "FILE")]
    pub ignore_files: Vec<String>,

    /// Output encoding
    #[arg(long, value_enum, default_value_t = OutputFormat::Grouped)]
    pub format: OutputFormat,

    /// Skip the project metadata section
    #[arg(long)]
    pub no_metadata: bool,

    /// Maximum estimated tokens in the output
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_TOKENS)]
    pub max_tokens: usize,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable quiet output (minimal)
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Execute the compaction run described by the parsed arguments.
    pub fn run(self) -> Result<()> {
        let out = Output::new(self.verbose, self.quiet);

        let options = PipelineOptions {
            root: self.root,
            output: self.output.clone(),
            format: self.format,
            extra_ignored_dirs: self.ignore_dirs,
            extra_ignored_files: self.ignore_files,
            include_metadata: !self.no_metadata,
            max_tokens: self.max_tokens,
        };

        let stats = pipeline::run(&options, &out)?;

        out.success(&format!(
            "Compacted {} files into {}",
            stats.files_processed - stats.files_trimmed,
            self.output.display()
        ));
        out.count("Σ", "Estimated tokens", stats.token_estimate);
        if stats.files_trimmed > 0 {
            out.warning(&format!(
                "{} files trimmed to stay within the {} token budget",
                stats.files_trimmed, options.max_tokens
            ));
        }
        out.verbose(&format!(
            "{} files seen, {} candidates, {} skipped, finished in {} ms",
            stats.files_discovered, stats.files_emitted, stats.files_skipped, stats.duration_ms
        ));

        Ok(())
    }
}
