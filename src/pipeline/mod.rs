//! Discovery/normalization pipeline
//!
//! One discovery producer feeds a pool of normalization workers over an
//! unbounded channel; workers append finished records to a shared collection.
//! The channel closing (all senders dropped once discovery returns) is the
//! sole completion signal — workers drain what remains and exit. After the
//! pool is done the record set is static: it is prioritized for LLM
//! consumption, greedily trimmed to the token budget, and rendered.

pub mod types;

use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use crate::cli::Output;
use crate::discovery::FileDiscoverer;
use crate::ignore::{IgnorePolicy, PolicyTables, WebProfile};
use crate::metadata;
use crate::normalize;
use crate::render::{self, OutputFormat};
use types::{CandidateFile, FileCategory, FileRecord, RunStats};

/// Conservative default token budget for most LLM context windows.
pub const DEFAULT_MAX_TOKENS: usize = 150_000;

/// File-name stems that matter most when trimming.
const IMPORTANT_STEMS: &[&str] = &[
    "program", "startup", "app", "main", "index", "layout", "appsettings",
];

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub root: PathBuf,
    pub output: PathBuf,
    pub format: OutputFormat,
    pub extra_ignored_dirs: Vec<String>,
    pub extra_ignored_files: Vec<String>,
    pub include_metadata: bool,
    pub max_tokens: usize,
}

/// Run one full compaction: build the policy, discover, normalize, order,
/// trim, render. Only configuration errors (bad root, unwritable output)
/// surface; per-file failures are logged and absorbed.
pub fn run(options: &PipelineOptions, out: &Output) -> Result<RunStats> {
    let start = Instant::now();

    let policy = Arc::new(build_policy(options, out)?);
    let web_project = policy.has_profile();

    let discoverer = FileDiscoverer::new(&options.root, Arc::clone(&policy))?;
    let records = Mutex::new(Vec::new());
    let skipped = AtomicUsize::new(0);
    let workers = num_cpus::get().max(1);

    let (tx, rx) = crossbeam::channel::unbounded::<CandidateFile>();

    let discovery_stats = crossbeam::thread::scope(|s| {
        let producer = s.spawn(|_| discoverer.discover(tx));

        for _ in 0..workers {
            let rx = rx.clone();
            let records = &records;
            let skipped = &skipped;
            s.spawn(move |_| {
                while let Ok(candidate) = rx.recv() {
                    match normalize::normalize_file(&candidate.path, &candidate.extension) {
                        Ok(content) if content.is_empty() => {
                            // All-whitespace file: valid, carries no signal.
                            skipped.fetch_add(1, Ordering::Relaxed);
                        }
                        Ok(content) => {
                            let record = FileRecord {
                                path: candidate.relative_path,
                                category: FileCategory::from_extension(&candidate.extension),
                                tokens: normalize::estimate_tokens(&content),
                                extension: candidate.extension,
                                content,
                            };
                            records.lock().unwrap().push(record);
                        }
                        Err(e) => {
                            skipped.fetch_add(1, Ordering::Relaxed);
                            tracing::warn!("failed to process {}: {:#}", candidate.path.display(), e);
                        }
                    }
                }
            });
        }

        // Remaining workers are joined when the scope closes; the channel is
        // already closed because `discover` consumed the last sender.
        producer.join()
    })
    .map_err(|_| anyhow!("pipeline worker panicked"))?
    .map_err(|_| anyhow!("discovery thread panicked"))?;

    let mut records = records
        .into_inner()
        .map_err(|_| anyhow!("result collection poisoned"))?;
    let processed = records.len();

    prioritize(&mut records);
    let before_trim = records.len();
    let records = trim_to_budget(records, options.max_tokens);

    let structure = if options.include_metadata {
        metadata::analyze(&options.root, &policy)
    } else {
        None
    };

    render::write_output(
        &options.output,
        &records,
        structure.as_ref(),
        options.format,
        web_project,
    )
    .with_context(|| format!("Failed to write output to {}", options.output.display()))?;

    Ok(RunStats {
        files_discovered: discovery_stats.seen,
        files_emitted: discovery_stats.emitted,
        files_processed: processed,
        files_skipped: skipped.into_inner(),
        files_trimmed: before_trim - records.len(),
        token_estimate: records.iter().map(|r| r.tokens).sum(),
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

/// Assemble the run's immutable ignore policy: built-in tables, detected
/// web-project layer, user additions, then the root's `.gitignore`.
fn build_policy(options: &PipelineOptions, out: &Output) -> Result<IgnorePolicy> {
    let mut policy = IgnorePolicy::new(PolicyTables::default());

    if let Some(profile) = WebProfile::detect(&options.root) {
        out.info("Web project detected - applying Blazor/ASP.NET filtering rules");
        policy.set_profile(profile);
    }

    policy.add_directories(options.extra_ignored_dirs.iter().cloned());
    policy.add_files(options.extra_ignored_files.iter().cloned());

    let rules = policy.load_gitignore(&options.root)?;
    if rules > 0 {
        out.verbose(&format!("Loaded {} usable .gitignore rules", rules));
    }

    Ok(policy)
}

/// Deterministic LLM-friendly ordering: category priority, then path depth
/// (root files first), then descending name importance, then lexical path.
pub fn prioritize(records: &mut [FileRecord]) {
    records.sort_by(|a, b| {
        a.category
            .priority()
            .cmp(&b.category.priority())
            .then(path_depth(&a.path).cmp(&path_depth(&b.path)))
            .then(name_importance(&b.path).cmp(&name_importance(&a.path)))
            .then(a.path.cmp(&b.path))
    });
}

fn path_depth(path: &str) -> usize {
    path.matches('/').count()
}

/// Heuristic weight for well-known entry points and architectural roles.
fn name_importance(path: &str) -> u32 {
    let stem = path
        .rsplit('/')
        .next()
        .unwrap_or(path)
        .split('.')
        .next()
        .unwrap_or_default()
        .to_lowercase();

    if IMPORTANT_STEMS.iter().any(|name| stem.contains(name)) {
        return 100;
    }

    let lower = path.to_lowercase();
    if lower.contains("controller") {
        90
    } else if lower.contains("service") {
        80
    } else if lower.contains("model") {
        70
    } else if lower.contains("component") {
        60
    } else {
        0
    }
}

/// Greedy budget trim over an already-prioritized record list. Stops at the
/// first record that would push the cumulative estimate past the budget, but
/// always keeps the first record even when it alone exceeds it.
pub fn trim_to_budget(records: Vec<FileRecord>, max_tokens: usize) -> Vec<FileRecord> {
    let mut kept = Vec::with_capacity(records.len());
    let mut total = 0usize;

    for record in records {
        if !kept.is_empty() && total + record.tokens > max_tokens {
            break;
        }
        total += record.tokens;
        kept.push(record);
    }

    kept
}
