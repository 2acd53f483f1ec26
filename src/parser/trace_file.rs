//! Main parser for the profiler's trace file format.
//!
//! A trace file is plain text, one event per line:
//!
//! ```text
//! Info=Command Line: ProfilerTestee.exe all
//! Assembly=mscorlib:2 Version:4.0.0.0
//! Jitted=2:100663297
//! Inlined=2:100663298
//! ```
//!
//! Everything left of the first `=` is the event label, everything right of
//! it is the record. Records carry a composite key whose fields are separated
//! by `:`; the first field is the id of the assembly the event belongs to.

use crate::utils::config::{COMMENT_PREFIX, KEY_SEPARATOR, LABEL_SEPARATOR};
use crate::utils::error::SetupError;
use log::{debug, warn};
use std::collections::HashMap;
use std::path::Path;

/// One event line from a profiler trace.
///
/// The record text is kept verbatim; it is used both for sorting and in the
/// normalized output, so nothing is trimmed or re-encoded here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceRecord {
    text: String,
}

impl TraceRecord {
    /// Wrap a raw record (the part of a trace line after the label separator).
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The full record text, verbatim from the trace file.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The id of the assembly this event belongs to: the first field of the
    /// composite key. A record without a key separator is its own id.
    pub fn assembly_id(&self) -> &str {
        self.text
            .split(KEY_SEPARATOR)
            .next()
            .unwrap_or(&self.text)
    }
}

/// A parsed trace file: event label mapped to its records in file order.
///
/// Built once by [`parse_trace_content`] and never mutated afterwards.
/// Labels the file does not contain simply yield an empty sequence.
#[derive(Debug, Clone, Default)]
pub struct TraceDocument {
    records: HashMap<String, Vec<TraceRecord>>,
}

impl TraceDocument {
    /// Records for the given label, in the order they appeared in the file.
    pub fn records(&self, label: &str) -> &[TraceRecord] {
        self.records.get(label).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of records across all labels.
    pub fn len(&self) -> usize {
        self.records.values().map(Vec::len).sum()
    }

    /// True if no records were parsed at all.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn push(&mut self, label: &str, record: TraceRecord) {
        self.records
            .entry(label.to_string())
            .or_default()
            .push(record);
    }
}

/// Parse raw trace-file text into a [`TraceDocument`].
///
/// Blank lines and `//` comment lines are skipped. A line without a label
/// separator is malformed; it is logged as a warning and skipped so that a
/// partially broken trace still produces maximal diagnostics instead of
/// aborting the comparison.
///
/// # Arguments
/// * `content` - Full text of the trace file
/// * `origin` - Name used in warnings (usually the file name)
pub fn parse_trace_content(content: &str, origin: &str) -> TraceDocument {
    let mut document = TraceDocument::default();
    let mut malformed = 0usize;

    for (index, line) in content.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || line.starts_with(COMMENT_PREFIX) {
            continue;
        }

        match line.split_once(LABEL_SEPARATOR) {
            Some((label, record)) => document.push(label, TraceRecord::new(record)),
            None => {
                warn!(
                    "Malformed line {} in trace '{}' (no '{}'): {}",
                    index + 1,
                    origin,
                    LABEL_SEPARATOR,
                    line
                );
                malformed += 1;
            }
        }
    }

    debug!(
        "Parsed {} records from trace '{}' ({} malformed lines skipped)",
        document.len(),
        origin,
        malformed
    );

    document
}

/// Read and parse a trace file from disk (UTF-8).
///
/// # Errors
/// * `SetupError::IoError` - the file cannot be read
pub fn read_trace_document(path: impl AsRef<Path>) -> Result<TraceDocument, SetupError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let origin = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(parse_trace_content(&content, &origin))
}
