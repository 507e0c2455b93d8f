use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdgPrepError {
    #[error("{}", header_mismatch_message(.file, .expected, .found))]
    HeaderMismatch {
        file: PathBuf,
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("file {}, line {line}: {reason}", .file.display())]
    MalformedRow {
        file: PathBuf,
        line: u64,
        reason: String,
    },

    #[error("file {}, line {line}: {source}", .file.display())]
    Write {
        file: PathBuf,
        line: u64,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid input file pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl IdgPrepError {
    /// Builds a `MalformedRow` from a csv reader error, keeping the line it
    /// reported when there is one.
    pub fn from_csv(file: impl Into<PathBuf>, fallback_line: u64, err: csv::Error) -> Self {
        let line = err
            .position()
            .map(|pos| pos.line())
            .unwrap_or(fallback_line);
        let reason = match err.kind() {
            csv::ErrorKind::Utf8 { err: utf8, .. } => {
                format!("invalid UTF-8 in field {}", utf8.field() + 1)
            },
            _ => err.to_string(),
        };
        IdgPrepError::MalformedRow {
            file: file.into(),
            line,
            reason,
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IdgPrepError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Index-aligned listing of the expected and found header fields.
fn header_mismatch_message(file: &Path, expected: &[String], found: &[String]) -> String {
    let mut msg = format!("The headings of {} have changed\nExpected:\n", file.display());
    for (index, field) in expected.iter().enumerate() {
        let _ = writeln!(msg, "{index} {field}");
    }
    msg.push_str("\nFound:\n");
    if found.is_empty() {
        msg.push_str("(no header row)\n");
    }
    for (index, field) in found.iter().enumerate() {
        let _ = writeln!(msg, "{index} {field}");
    }
    msg.push_str("\nHeaders have changed");
    msg
}

pub type Result<T> = std::result::Result<T, IdgPrepError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_mismatch_lists_both_sides() {
        let err = IdgPrepError::HeaderMismatch {
            file: PathBuf::from("idg_target_list_A.tsv"),
            expected: vec!["gene".into(), "idgfamily".into()],
            found: vec!["Gene".into(), "Family".into(), "Extra".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("idg_target_list_A.tsv"));
        assert!(msg.contains("0 gene\n1 idgfamily\n"));
        assert!(msg.contains("0 Gene\n1 Family\n2 Extra\n"));
        assert!(msg.ends_with("Headers have changed"));
    }

    #[test]
    fn test_header_mismatch_without_header_row() {
        let err = IdgPrepError::HeaderMismatch {
            file: PathBuf::from("empty.tsv"),
            expected: vec!["gene".into(), "idgfamily".into()],
            found: Vec::new(),
        };
        assert!(err.to_string().contains("(no header row)"));
    }

    #[test]
    fn test_malformed_row_reports_file_and_line() {
        let err = IdgPrepError::MalformedRow {
            file: PathBuf::from("idg_target_list_B.tsv"),
            line: 7,
            reason: "expected at least 2 fields, found 1".into(),
        };
        assert_eq!(
            err.to_string(),
            "file idg_target_list_B.tsv, line 7: expected at least 2 fields, found 1"
        );
    }

    #[test]
    fn test_write_error_reports_file_and_line() {
        let err = IdgPrepError::Write {
            file: PathBuf::from("idg_target_list.tsv"),
            line: 3,
            source: std::io::Error::other("disk full"),
        };
        assert_eq!(err.to_string(), "file idg_target_list.tsv, line 3: disk full");
    }
}
