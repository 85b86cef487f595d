use std::collections::HashMap;

use crate::{ImportResult, SourceRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeStats {
    pub updated: usize,
    pub appended: usize,
}

/// Merges `incoming` into `existing` and returns the new collection.
///
/// A record whose id is already present replaces the old one in place, every
/// field included. Note that this re-enables a source the user disabled
/// locally if the catalog says it is enabled, and takes the catalog priority.
/// New ids are appended in input order with their priority set to their
/// 1-based position at insertion.
pub fn merge_sources(existing: &[SourceRecord], incoming: &[SourceRecord]) -> Vec<SourceRecord> {
    merge_sources_with_stats(existing, incoming).0
}

pub fn merge_sources_with_stats(
    existing: &[SourceRecord],
    incoming: &[SourceRecord],
) -> (Vec<SourceRecord>, MergeStats) {
    let mut merged = existing.to_vec();
    let mut positions: HashMap<String, usize> = merged
        .iter()
        .enumerate()
        .map(|(index, record)| (record.id.clone(), index))
        .collect();
    let mut stats = MergeStats::default();

    for record in incoming {
        if let Some(&index) = positions.get(&record.id) {
            merged[index] = record.clone();
            stats.updated += 1;
            continue;
        }
        let priority = u32::try_from(merged.len() + 1).unwrap_or(u32::MAX);
        positions.insert(record.id.clone(), merged.len());
        merged.push(SourceRecord {
            priority,
            ..record.clone()
        });
        stats.appended += 1;
    }

    (merged, stats)
}

/// Merges each group of `result` into the matching existing collection.
pub fn merge_import(
    existing_standard: &[SourceRecord],
    existing_restricted: &[SourceRecord],
    result: &ImportResult,
) -> (Vec<SourceRecord>, Vec<SourceRecord>) {
    (
        merge_sources(existing_standard, &result.standard),
        merge_sources(existing_restricted, &result.restricted),
    )
}
