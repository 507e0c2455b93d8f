//! Deduplication and ordering of loaded target records.

use std::collections::BTreeSet;

use tracing::info;

use crate::models::{TargetList, WorkingSet};

/// Collapse the working set to unique (gene, family) records ordered by gene.
///
/// The records go through an ordered set keyed on the full composite, so
/// identical rows from any number of files leave exactly one survivor and
/// the set's iteration order is the output order. Records sharing a gene
/// but not a family are both kept, ordered by family.
pub fn consolidate(working: WorkingSet) -> TargetList {
    let loaded = working.len();
    let unique: BTreeSet<_> = working.into_records().into_iter().collect();
    let list = TargetList::from_sorted(unique.into_iter().collect());

    info!(
        loaded,
        unique = list.len(),
        duplicates = loaded - list.len(),
        "Consolidated target records"
    );
    list
}
