//! Trace file parsing.
//!
//! This module handles:
//! - Splitting raw trace text into labeled event records
//! - Reporting malformed lines as warnings without failing the parse
//! - Exposing the per-label record sequences for normalization

pub mod trace_file;

// Re-export main types
pub use trace_file::{parse_trace_content, read_trace_document, TraceDocument, TraceRecord};
