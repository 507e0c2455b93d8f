//! Input file discovery.
//!
//! Lists one directory and keeps the regular files whose whole name matches
//! the input pattern. Results are sorted by file name so repeated runs see
//! the inputs in the same order.

use std::path::{Path, PathBuf};

use idgprep_common::{IdgPrepError, Result};
use regex::Regex;
use tracing::{debug, warn};

/// `idg_target_list_<alphanumeric>.tsv`
pub const DEFAULT_INPUT_PATTERN: &str = r"^idg_target_list_[A-Za-z0-9]+\.tsv$";

pub fn compile_pattern(pattern: &str) -> Result<Regex> {
    Ok(Regex::new(pattern)?)
}

/// Matching input files in `dir`, sorted by file name.
pub fn discover_inputs(dir: &Path, pattern: &Regex) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| IdgPrepError::io(dir, e))?;

    let mut inputs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| IdgPrepError::io(dir, e))?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            debug!(name = ?name, "Skipping non UTF-8 file name");
            continue;
        };
        if !pattern.is_match(name) {
            continue;
        }
        let is_file = entry
            .file_type()
            .map_err(|e| IdgPrepError::io(entry.path(), e))?
            .is_file();
        if !is_file {
            debug!(name, "Skipping non-file match");
            continue;
        }
        inputs.push(entry.path());
    }

    inputs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    if inputs.is_empty() {
        warn!(dir = %dir.display(), pattern = pattern.as_str(), "No input files matched");
    } else {
        debug!(n_inputs = inputs.len(), "Discovered input files");
    }
    Ok(inputs)
}
