//! Target list TSV loader.
//!
//! Reads one `gene<TAB>idgfamily` file, validates its header, normalises the
//! family column and hands the records to the working set. A file is all or
//! nothing: its records reach the working set only if every row parsed.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use idgprep_common::{IdgPrepError, Result, TargetRecord};
use tracing::{debug, info, warn};

use crate::models::{FileReport, WorkingSet};
use crate::normalise::normalise_family;
use crate::schema::validate_header;

/// Records parsed from one file, not yet merged into a working set.
#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub rows_read: usize,
    pub records: Vec<TargetRecord>,
}

/// Load `path` and append its records to `working`.
///
/// On error `working` is left exactly as it was.
pub fn load_into(path: &Path, working: &mut WorkingSet) -> Result<FileReport> {
    let loaded = load_file(path)?;
    let report = FileReport {
        file: path.to_path_buf(),
        rows_read: loaded.rows_read,
        records: loaded.records.len(),
    };
    working.append(loaded.records);

    info!(
        file = %path.display(),
        rows = report.rows_read,
        records = report.records,
        "Loaded target list"
    );
    Ok(report)
}

/// Open and parse a target list file. The handle is closed before returning.
pub fn load_file(path: &Path) -> Result<LoadedFile> {
    debug!(file = %path.display(), "Opening target list");
    let file = File::open(path).map_err(|e| IdgPrepError::io(path, e))?;
    load_reader(path, file)
}

/// Parse target list rows from any reader. `source` names the input in errors.
///
/// Blank lines are rows with no fields: before the header they fail the
/// header check, after it they are malformed rows.
pub fn load_reader<R: Read>(source: &Path, mut reader: R) -> Result<LoadedFile> {
    let mut content = Vec::new();
    reader
        .read_to_end(&mut content)
        .map_err(|e| IdgPrepError::io(source, e))?;

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_slice());

    let mut lines = LineCounter::default();
    let mut row = csv::StringRecord::new();
    let mut rows_read = 0usize;
    let mut records = Vec::new();
    let mut header_seen = false;

    loop {
        // The reader skips blank lines silently, so look for them in the gap
        // between the previous record and the next one.
        let start = record_start(&content, rdr.position().byte() as usize);
        if let Some(blank) = blank_line_at(&content, start) {
            let line = lines.line_at(&content, blank);
            if !header_seen {
                return Err(missing_header(source));
            }
            return Err(IdgPrepError::MalformedRow {
                file: source.to_path_buf(),
                line,
                reason: "expected at least 2 fields, found 0".into(),
            });
        }
        let line = lines.line_at(&content, start);

        let more = rdr
            .read_record(&mut row)
            .map_err(|e| IdgPrepError::from_csv(source, line, e))?;
        if !more {
            break;
        }
        rows_read += 1;

        if !header_seen {
            validate_header(source, row.iter())?;
            header_seen = true;
            continue;
        }

        let (gene, raw_family) = match (row.get(0), row.get(1)) {
            (Some(gene), Some(family)) => (gene, family),
            _ => {
                return Err(IdgPrepError::MalformedRow {
                    file: source.to_path_buf(),
                    line,
                    reason: format!("expected at least 2 fields, found {}", row.len()),
                });
            }
        };

        if gene.is_empty() {
            warn!(file = %source.display(), line, "Row has an empty gene field");
        }

        let family = normalise_family(raw_family);
        if !family.is_known() {
            debug!(file = %source.display(), line, family = raw_family, "Family outside IDG vocabulary kept verbatim");
        }
        records.push(TargetRecord::new(gene, family));
    }

    if !header_seen {
        return Err(missing_header(source));
    }

    Ok(LoadedFile { rows_read, records })
}

fn missing_header(source: &Path) -> IdgPrepError {
    IdgPrepError::HeaderMismatch {
        file: source.to_path_buf(),
        expected: crate::schema::EXPECTED_HEADER.iter().map(|s| s.to_string()).collect(),
        found: Vec::new(),
    }
}

/// Offset where the next row begins, given where the reader stopped. The
/// reader ends a record on the `\r` of a `\r\n` pair and leaves the `\n`.
fn record_start(content: &[u8], offset: usize) -> usize {
    let split_crlf = offset > 0
        && content.get(offset - 1) == Some(&b'\r')
        && content.get(offset) == Some(&b'\n');
    if split_crlf {
        offset + 1
    } else {
        offset
    }
}

fn blank_line_at(content: &[u8], offset: usize) -> Option<usize> {
    match content.get(offset) {
        Some(b'\n') | Some(b'\r') => Some(offset),
        _ => None,
    }
}

/// 1-based line numbers for increasing byte offsets.
#[derive(Default)]
struct LineCounter {
    offset: usize,
    newlines: u64,
}

impl LineCounter {
    fn line_at(&mut self, content: &[u8], offset: usize) -> u64 {
        let end = offset.min(content.len());
        if end > self.offset {
            self.newlines += content[self.offset..end].iter().filter(|&&b| b == b'\n').count() as u64;
            self.offset = end;
        }
        self.newlines + 1
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use idgprep_common::IdgFamily;

    fn load_str(content: &str) -> Result<LoadedFile> {
        load_reader(Path::new("idg_target_list_T.tsv"), content.as_bytes())
    }

    #[test]
    fn test_loads_and_normalises_rows() {
        let loaded = load_str("gene\tidgfamily\nABL1\tkinase\nADRB2\tgpcr\nX1\tNon-IDG\n").unwrap();
        assert_eq!(loaded.rows_read, 4);
        assert_eq!(
            loaded.records,
            vec![
                TargetRecord::new("ABL1", IdgFamily::Kinase),
                TargetRecord::new("ADRB2", IdgFamily::Gpcr),
                TargetRecord::new("X1", IdgFamily::Other("Non-IDG".into())),
            ]
        );
    }

    #[test]
    fn test_row_count_includes_header() {
        let loaded = load_str("Gene\tIDGFamily\n").unwrap();
        assert_eq!(loaded.rows_read, 1);
        assert!(loaded.records.is_empty());
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let loaded = load_str("gene\tidgfamily\nCACNA1A\tionchannel\tTchem\n").unwrap();
        assert_eq!(loaded.records, vec![TargetRecord::new("CACNA1A", IdgFamily::IonChannel)]);
    }

    #[test]
    fn test_gene_kept_verbatim() {
        let loaded = load_str("gene\tidgfamily\n abl1 \tKinase\n").unwrap();
        assert_eq!(loaded.records[0].gene, " abl1 ");
    }

    #[test]
    fn test_bad_header_fails_before_rows() {
        let err = load_str("symbol\tfamily\nABL1\tkinase\n").unwrap_err();
        assert!(matches!(err, IdgPrepError::HeaderMismatch { .. }));
    }

    #[test]
    fn test_empty_input_is_header_mismatch() {
        let err = load_str("").unwrap_err();
        match err {
            IdgPrepError::HeaderMismatch { found, .. } => assert!(found.is_empty()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_short_row_reports_line() {
        let err = load_str("gene\tidgfamily\nABL1\tkinase\nADRB2\n").unwrap_err();
        match err {
            IdgPrepError::MalformedRow { file, line, .. } => {
                assert_eq!(file, Path::new("idg_target_list_T.tsv"));
                assert_eq!(line, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_blank_line_between_rows_is_malformed_row() {
        let err = load_str("gene\tidgfamily\nABL1\tkinase\n\nADRB2\tgpcr\n").unwrap_err();
        match err {
            IdgPrepError::MalformedRow { line, reason, .. } => {
                assert_eq!(line, 3);
                assert_eq!(reason, "expected at least 2 fields, found 0");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_trailing_blank_line_is_malformed_row() {
        let err = load_str("gene\tidgfamily\nABL1\tkinase\n\n").unwrap_err();
        assert!(matches!(err, IdgPrepError::MalformedRow { line: 3, .. }));
    }

    #[test]
    fn test_blank_line_before_header_is_header_mismatch() {
        let err = load_str("\ngene\tidgfamily\nABL1\tkinase\n").unwrap_err();
        match err {
            IdgPrepError::HeaderMismatch { found, .. } => assert!(found.is_empty()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_crlf_input_loads_and_reports_lines() {
        let loaded = load_str("Gene\tIDGFamily\r\nABL1\tKinase\r\nADRB2\tGPCR\r\n").unwrap();
        assert_eq!(loaded.rows_read, 3);
        assert_eq!(loaded.records[1], TargetRecord::new("ADRB2", IdgFamily::Gpcr));

        let err = load_str("gene\tidgfamily\r\nABL1\tkinase\r\n\r\nADRB2\tgpcr\r\n").unwrap_err();
        assert!(matches!(err, IdgPrepError::MalformedRow { line: 3, .. }));

        let err = load_str("gene\tidgfamily\r\nABL1\tkinase\r\nADRB2\r\n").unwrap_err();
        assert!(matches!(err, IdgPrepError::MalformedRow { line: 3, .. }));
    }

    #[test]
    fn test_quoted_newline_does_not_shift_line_numbers() {
        let err = load_str("gene\tidgfamily\n\"TWO\nLINES\"\tkinase\nSHORT\n").unwrap_err();
        assert!(matches!(err, IdgPrepError::MalformedRow { line: 4, .. }));
    }

    #[test]
    fn test_invalid_utf8_is_malformed_row() {
        let mut bytes = b"gene\tidgfamily\nABL1\tkinase\n".to_vec();
        bytes.extend_from_slice(b"BAD\t\xff\xfe\n");
        let err = load_reader(Path::new("idg_target_list_T.tsv"), bytes.as_slice()).unwrap_err();
        match err {
            IdgPrepError::MalformedRow { reason, .. } => assert!(reason.contains("UTF-8"), "{reason}"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_quoted_field_with_tab() {
        let loaded = load_str("gene\tidgfamily\n\"GENE\tA\"\tkinase\n").unwrap();
        assert_eq!(loaded.records[0].gene, "GENE\tA");
    }

    #[test]
    fn test_failed_load_leaves_working_set_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("idg_target_list_Bad.tsv");
        std::fs::write(&path, "gene\tidgfamily\nABL1\tkinase\nBROKEN\n").unwrap();

        let mut working = WorkingSet::new();
        working.push(TargetRecord::new("KEEP", IdgFamily::Gpcr));
        assert!(load_into(&path, &mut working).is_err());
        assert_eq!(working.len(), 1);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let mut working = WorkingSet::new();
        let err = load_into(Path::new("/nonexistent/idg_target_list_X.tsv"), &mut working).unwrap_err();
        assert!(matches!(err, IdgPrepError::Io { .. }));
    }
}
