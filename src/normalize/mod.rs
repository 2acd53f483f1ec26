//! Trace filtering and normalization.
//!
//! Raw trace ordering and the inlined/jitted split are environment-dependent:
//! they vary with machine, runtime patch level and JIT heuristics. What stays
//! invariant for the assemblies under test is *which* method records appear.
//! Normalization therefore reduces a trace to a canonical string - the
//! filtered union of inlined and jitted records, deduplicated, sorted and
//! joined - and that string is the sole comparison key.

use crate::parser::{TraceDocument, TraceRecord};
use crate::utils::config::{LABEL_INLINED, LABEL_JITTED};
use std::collections::{BTreeSet, HashSet};

/// Keep only the records belonging to one of the allowed assemblies.
///
/// The filter is stable: output order is input order, records are never
/// rewritten. An empty allow-set yields an empty result, which is a valid
/// outcome (a caller comparing zero assemblies).
pub fn filter_by_assembly<'a>(
    records: &'a [TraceRecord],
    allow: &HashSet<String>,
) -> Vec<&'a TraceRecord> {
    records
        .iter()
        .filter(|record| allow.contains(record.assembly_id()))
        .collect()
}

/// Reduce a trace document to its canonical comparison form.
///
/// Filters the inlined and jitted sequences independently with the same
/// allow-set, takes the set-union of the two (a record text appearing under
/// both labels collapses to one entry - the comparison cares about which
/// methods were touched, not by which mechanism), sorts lexicographically
/// by full record text and joins with `\n`.
///
/// Normalizing is idempotent: parsing and re-normalizing an already
/// normalized trace with the same allow-set yields the same string.
pub fn normalize(document: &TraceDocument, allow: &HashSet<String>) -> String {
    let inlined = filter_by_assembly(document.records(LABEL_INLINED), allow);
    let jitted = filter_by_assembly(document.records(LABEL_JITTED), allow);

    // BTreeSet gives dedup and lexicographic order in one step.
    let union: BTreeSet<&str> = inlined
        .into_iter()
        .chain(jitted)
        .map(TraceRecord::text)
        .collect();

    union.into_iter().collect::<Vec<_>>().join("\n")
}
