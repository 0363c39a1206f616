//! Rendering many recordings on a worker pool.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::{RenderSummary, TextRenderer};
use crate::error::{ReplayError, Result};

/// Worker pool settings for [`render_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    /// Worker threads; `0` means one per available core.
    pub n_jobs: usize,
    /// Report results in input order instead of completion order.
    pub ordered: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            n_jobs: 0,
            ordered: true,
        }
    }
}

impl BatchOptions {
    fn workers(&self, inputs: usize) -> usize {
        let n = if self.n_jobs == 0 {
            default_jobs()
        } else {
            self.n_jobs
        };
        n.clamp(1, inputs.max(1))
    }
}

/// Worker count used when none is configured.
pub fn default_jobs() -> usize {
    std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(4)
}

/// How one input fared.
#[derive(Debug)]
pub enum JobOutcome {
    Rendered(RenderSummary),
    /// The input was not a recording; nothing was written.
    Skipped(String),
    Failed(ReplayError),
}

/// One input and its outcome.
#[derive(Debug)]
pub struct JobResult {
    pub recording: PathBuf,
    pub outcome: JobOutcome,
}

impl JobResult {
    pub fn is_rendered(&self) -> bool {
        matches!(self.outcome, JobOutcome::Rendered(_))
    }
}

/// Find every file under `dir` whose name contains `ttyrec`.
///
/// Files are keyed by file name: when two directories hold the same name,
/// the later one in sorted path order wins and a warning is logged. The
/// result is sorted by path.
pub fn collect_recordings(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    walk(dir, &mut found)?;
    found.sort();

    let mut by_name: BTreeMap<String, PathBuf> = BTreeMap::new();
    for path in found {
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            continue;
        };
        if let Some(previous) = by_name.insert(name.clone(), path.clone()) {
            warn!(
                name = %name,
                dropped = %previous.display(),
                kept = %path.display(),
                "duplicate recording name"
            );
        }
    }

    let mut recordings: Vec<PathBuf> = by_name.into_values().collect();
    recordings.sort();
    debug!(dir = %dir.display(), count = recordings.len(), "collected recordings");
    Ok(recordings)
}

fn walk(dir: &Path, found: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|e| ReplayError::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| ReplayError::io(dir, e))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| ReplayError::io(&path, e))?;
        if file_type.is_dir() {
            walk(&path, found)?;
        } else if entry.file_name().to_string_lossy().contains("ttyrec") {
            found.push(path);
        }
    }
    Ok(())
}

/// Render every input, one job per recording.
///
/// A failing job never stops the others. Non-recordings are skipped with a
/// warning; other failures are reported in their [`JobResult`]. If the pool
/// cannot be built the inputs are rendered sequentially.
pub fn render_all(
    renderer: &TextRenderer,
    recordings: &[PathBuf],
    options: BatchOptions,
) -> Vec<JobResult> {
    let workers = options.workers(recordings.len());
    info!(
        inputs = recordings.len(),
        workers,
        ordered = options.ordered,
        output_dir = %renderer.output_dir().display(),
        "rendering recordings"
    );

    let pool = match rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("ttyr-render-{}", i))
        .build()
    {
        Ok(pool) => pool,
        Err(e) => {
            warn!(error = %e, "failed to build worker pool, rendering sequentially");
            return recordings
                .iter()
                .map(|path| render_one(renderer, path))
                .collect();
        }
    };

    pool.install(|| {
        if options.ordered {
            recordings
                .par_iter()
                .map(|path| render_one(renderer, path))
                .collect()
        } else {
            let (tx, rx) = mpsc::channel();
            recordings.par_iter().for_each_with(tx, |tx, path| {
                // The receiver outlives every sender.
                let _ = tx.send(render_one(renderer, path));
            });
            rx.into_iter().collect()
        }
    })
}

fn render_one(renderer: &TextRenderer, path: &Path) -> JobResult {
    let outcome = match renderer.render(path) {
        Ok(summary) => JobOutcome::Rendered(summary),
        Err(e) if e.is_skippable() => {
            warn!(recording = %path.display(), "file is not a ttyrec, skipping");
            JobOutcome::Skipped(e.to_string())
        }
        Err(e) => {
            warn!(recording = %path.display(), error = %e, "failed to render recording");
            JobOutcome::Failed(e)
        }
    };
    JobResult {
        recording: path.to_path_buf(),
        outcome,
    }
}
