//! End-to-end consolidation pipeline.
//!
//! Orchestrates one run:
//!   1. Load each input file in order into a shared working set
//!   2. Collapse the working set to unique records sorted by gene
//!   3. Write the consolidated list (skipped on dry runs)
//!
//! Progress is reported through an event callback so the caller decides how
//! to present it. The first error aborts the run; nothing after it executes.

use std::path::{Path, PathBuf};
use std::time::Instant;

use idgprep_common::Result;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::dedup::consolidate;
use crate::loader::load_into;
use crate::models::{FileReport, TargetList, WorkingSet};
use crate::writer::{write_target_list, WriteMode};

// ── Job config ────────────────────────────────────────────────────────────────

/// Parameters for a single consolidation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsolidationJob {
    /// Input files, loaded in this order.
    pub inputs: Vec<PathBuf>,
    pub output: PathBuf,
    #[serde(default)]
    pub write_mode: WriteMode,
    /// Load and consolidate without writing the output.
    #[serde(default)]
    pub dry_run: bool,
}

/// Progress notifications emitted while a job runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent<'a> {
    FileStarted { file: &'a Path },
    FileLoaded(&'a FileReport),
    Consolidated { loaded: usize, unique: usize },
    Written { output: &'a Path, records: usize },
}

/// Summary of a completed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsolidationResult {
    pub files: Vec<FileReport>,
    pub records_loaded: usize,
    pub unique_records: usize,
    /// `None` on dry runs.
    pub output: Option<PathBuf>,
    pub duration_ms: u64,
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Run a consolidation job, returning the consolidated list with the summary.
#[instrument(skip_all, fields(n_inputs = job.inputs.len(), dry_run = job.dry_run))]
pub fn run_consolidation<F>(
    job: &ConsolidationJob,
    mut on_event: F,
) -> Result<(ConsolidationResult, TargetList)>
where
    F: FnMut(PipelineEvent<'_>),
{
    let started = Instant::now();
    let mut working = WorkingSet::new();
    let mut files = Vec::with_capacity(job.inputs.len());

    for input in &job.inputs {
        on_event(PipelineEvent::FileStarted { file: input });
        let report = load_into(input, &mut working)?;
        on_event(PipelineEvent::FileLoaded(&report));
        files.push(report);
    }

    let records_loaded = working.len();
    let list = consolidate(working);
    on_event(PipelineEvent::Consolidated {
        loaded: records_loaded,
        unique: list.len(),
    });

    let output = if job.dry_run {
        info!(output = %job.output.display(), "Dry run, output not written");
        None
    } else {
        let records = write_target_list(&job.output, &list, job.write_mode)?;
        on_event(PipelineEvent::Written {
            output: &job.output,
            records,
        });
        Some(job.output.clone())
    };

    let result = ConsolidationResult {
        files,
        records_loaded,
        unique_records: list.len(),
        output,
        duration_ms: started.elapsed().as_millis() as u64,
    };
    info!(
        files = result.files.len(),
        loaded = result.records_loaded,
        unique = result.unique_records,
        duration_ms = result.duration_ms,
        "Consolidation complete"
    );
    Ok((result, list))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
