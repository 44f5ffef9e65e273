//! File discovery
//!
//! Walks the root directory, evaluates the ignore policy for every regular
//! file in parallel, and hands surviving candidates to the normalization
//! workers over a channel. Emission order is unspecified; ordering happens
//! after the pipeline drains.

use anyhow::{bail, Result};
use crossbeam::channel::Sender;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use walkdir::WalkDir;

use crate::ignore::IgnorePolicy;
use crate::pipeline::types::CandidateFile;

/// Counts from one discovery pass.
#[derive(Debug, Default)]
pub struct DiscoveryStats {
    /// Regular files seen by the walker
    pub seen: usize,
    /// Candidates that survived the ignore policy
    pub emitted: usize,
}

pub struct FileDiscoverer {
    root: PathBuf,
    policy: Arc<IgnorePolicy>,
}

impl FileDiscoverer {
    /// A missing or non-directory root is a fatal configuration error.
    pub fn new(root: &Path, policy: Arc<IgnorePolicy>) -> Result<Self> {
        if !root.is_dir() {
            bail!("Root path is not a directory: {}", root.display());
        }
        Ok(Self {
            root: root.to_path_buf(),
            policy,
        })
    }

    /// Walk the tree and send every non-excluded file down the channel.
    /// Exclusion checks are independent per file and run in parallel; the
    /// policy is shared read-only. Walk errors are logged and skipped.
    pub fn discover(&self, tx: Sender<CandidateFile>) -> DiscoveryStats {
        let mut paths = Vec::new();
        for entry in WalkDir::new(&self.root).follow_links(false) {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_file() {
                        paths.push(entry.into_path());
                    }
                }
                Err(e) => {
                    tracing::warn!("walk error under {}: {}", self.root.display(), e);
                }
            }
        }

        let seen = paths.len();
        let emitted = AtomicUsize::new(0);

        paths.into_par_iter().for_each_with(tx, |tx, path| {
            if let Some(candidate) = self.evaluate(path) {
                emitted.fetch_add(1, Ordering::Relaxed);
                // A send error means the consumers are gone; nothing to do.
                let _ = tx.send(candidate);
            }
        });

        DiscoveryStats {
            seen,
            emitted: emitted.into_inner(),
        }
    }

    /// Apply the ignore policy to one absolute path, producing a candidate
    /// with a `/`-normalized relative path when it is kept.
    fn evaluate(&self, path: PathBuf) -> Option<CandidateFile> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let relative_path = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        if relative_path.is_empty() {
            return None;
        }

        let file_name = path.file_name()?.to_string_lossy().to_string();
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if self.policy.is_excluded(&relative_path, &file_name, &extension) {
            return None;
        }

        Some(CandidateFile {
            path,
            relative_path,
            file_name,
            extension,
        })
    }
}
