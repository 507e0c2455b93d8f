//! Data models for the consolidation pipeline.

use std::path::PathBuf;

use idgprep_common::TargetRecord;
use serde::{Deserialize, Serialize};

/// Records accumulated across every input file, before deduplication.
///
/// Append-only; duplicates are expected and kept until [`crate::dedup`]
/// collapses them.
#[derive(Debug, Clone, Default)]
pub struct WorkingSet {
    records: Vec<TargetRecord>,
}

impl WorkingSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: TargetRecord) {
        self.records.push(record);
    }

    pub fn append(&mut self, records: Vec<TargetRecord>) {
        self.records.extend(records);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<TargetRecord> {
        self.records
    }
}

/// Deduplicated records, sorted by gene then family.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetList {
    records: Vec<TargetRecord>,
}

impl TargetList {
    /// Caller guarantees `records` is already unique and sorted.
    pub(crate) fn from_sorted(records: Vec<TargetRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TargetRecord> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[TargetRecord] {
        &self.records
    }
}

impl<'a> IntoIterator for &'a TargetList {
    type Item = &'a TargetRecord;
    type IntoIter = std::slice::Iter<'a, TargetRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Outcome of loading a single input file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileReport {
    pub file: PathBuf,
    /// Rows read, header row included.
    pub rows_read: usize,
    /// Data records appended to the working set.
    pub records: usize,
}
