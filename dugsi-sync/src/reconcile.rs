//! Snapshot reconciliation.
//!
//! Merges a local and a remote snapshot of one table. The policy is
//! last-writer-wins-by-source: when the same `id` exists on both sides
//! with different content, the remote version is authoritative. Records
//! present on only one side always survive into the merged result, and
//! a surviving local-only record means the merged table must be pushed
//! back to the remote replica.
//!
//! Known policy gap: a record deleted locally but still present remotely
//! is resurrected here — without tombstones the merge cannot tell
//! "deleted" apart from "never synced". That is the documented behavior,
//! not something this module tries to fix.

use dugsi_types::Record;
use std::collections::HashMap;
use tracing::warn;

/// Result of reconciling one table.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedTable {
    /// The merged records: local insertion order first, remote-only
    /// records appended in remote order.
    pub records: Vec<Record>,
    /// Whether the merged result differs from the remote snapshot and
    /// must be written back (and persisted locally).
    pub needs_push: bool,
}

/// Merges a local and a remote snapshot of the same table.
///
/// Remote records without a string `id` cannot be keyed and are skipped
/// with a warning; local records without an `id` pass through untouched
/// (they can never conflict with a remote record).
#[must_use]
pub fn merge_snapshots(local: &[Record], remote: &[Record]) -> MergedTable {
    let mut records: Vec<Record> = local.to_vec();
    let mut index: HashMap<String, usize> = HashMap::with_capacity(records.len());
    for (pos, record) in records.iter().enumerate() {
        if let Some(id) = record.id() {
            index.insert(id.to_string(), pos);
        }
    }

    let mut changed = false;
    for record in remote {
        let Some(id) = record.id() else {
            warn!("remote record without id skipped during merge");
            continue;
        };
        match index.get(id) {
            Some(&pos) => {
                // Remote wins on any field-level difference.
                if records[pos] != *record {
                    records[pos] = record.clone();
                    changed = true;
                }
            }
            None => {
                index.insert(id.to_string(), records.len());
                records.push(record.clone());
                changed = true;
            }
        }
    }

    // Strictly more merged records than remote ones means at least one
    // local-only record that the remote has never seen.
    let needs_push = changed || records.len() > remote.len();
    MergedTable { records, needs_push }
}
