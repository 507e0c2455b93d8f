//! Consolidated target list writer.
//!
//! Output is `Gene<TAB>IDGFamily` followed by one row per record, `\r\n`
//! terminated. Fields containing a tab, quote or newline are quoted.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use idgprep_common::{IdgPrepError, Result};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::models::TargetList;
use crate::schema::OUTPUT_HEADER;

/// Default output file name.
pub const OUTPUT_FILE_NAME: &str = "idg_target_list.tsv";

/// How the output file replaces an existing one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Truncate and write in place. A failure part way leaves a partial file.
    #[default]
    Truncate,
    /// Write a sibling temp file and rename it over the destination.
    Atomic,
}

/// Write `list` to `path`, returning the number of data rows written.
pub fn write_target_list(path: &Path, list: &TargetList, mode: WriteMode) -> Result<usize> {
    debug!(file = %path.display(), ?mode, "Writing target list");
    let written = match mode {
        WriteMode::Truncate => {
            let file = File::create(path).map_err(|e| IdgPrepError::io(path, e))?;
            write_rows(path, file, list)?
        }
        WriteMode::Atomic => {
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            let mut tmp = NamedTempFile::new_in(dir).map_err(|e| IdgPrepError::io(dir, e))?;
            let written = write_rows(path, tmp.as_file_mut(), list)?;
            tmp.as_file()
                .sync_all()
                .map_err(|e| IdgPrepError::io(path, e))?;
            tmp.persist(path)
                .map_err(|e| IdgPrepError::io(path, e.error))?;
            written
        }
    };

    info!(file = %path.display(), records = written, "Wrote target list");
    Ok(written)
}

/// Serialise header and records to `out`. `target` names the output in errors.
///
/// Each row is flushed as soon as it is encoded, so an I/O failure carries the
/// line that was being written.
pub fn write_rows<W: Write>(target: &Path, out: W, list: &TargetList) -> Result<usize> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .terminator(csv::Terminator::CRLF)
        .from_writer(out);

    let mut line: u64 = 1;
    write_line(target, line, &mut wtr, OUTPUT_HEADER)?;

    for record in list {
        line += 1;
        write_line(target, line, &mut wtr, [record.gene.as_str(), record.family.as_str()])?;
    }
    Ok(list.len())
}

fn write_line<W: Write, const N: usize>(
    target: &Path,
    line: u64,
    wtr: &mut csv::Writer<W>,
    fields: [&str; N],
) -> Result<()> {
    wtr.write_record(fields)
        .map_err(|e| write_error(target, line, e))?;
    wtr.flush().map_err(|e| IdgPrepError::Write {
        file: target.to_path_buf(),
        line,
        source: e,
    })
}

fn write_error(target: &Path, line: u64, err: csv::Error) -> IdgPrepError {
    let source = match err.into_kind() {
        csv::ErrorKind::Io(io) => io,
        other => std::io::Error::other(format!("{other:?}")),
    };
    IdgPrepError::Write {
        file: target.to_path_buf(),
        line,
        source,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
