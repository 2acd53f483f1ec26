//! JSON verdict report writer.
//!
//! CI jobs archive these alongside the raw trace so a regression can be
//! diffed without re-running the profiler.

use crate::utils::config::SCHEMA_VERSION;
use crate::utils::error::OutputError;
use crate::verify::VerifyCase;
use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Serialized verdict of one verification case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyReport {
    /// Report schema version
    pub version: String,
    /// "pass", "trace-mismatch", "marker-missing"
    pub verdict: String,
    /// The testee that was profiled
    pub executable: String,
    /// The located trace artifact, if one was found
    pub trace_file: Option<String>,
    /// Assembly ids that took part in the comparison, sorted
    pub assemblies: Vec<String>,
    /// Normalized actual trace
    pub normalized_actual: String,
    /// Normalized reference trace
    pub normalized_reference: String,
    /// ISO 8601 timestamp of report generation
    pub generated_at: String,
}

impl VerifyReport {
    /// Assemble a report from a case and the two normalized strings.
    pub fn new(
        case: &VerifyCase,
        verdict: &str,
        trace_file: Option<&Path>,
        normalized_actual: String,
        normalized_reference: String,
    ) -> Self {
        let mut assemblies: Vec<String> = case.assemblies.iter().cloned().collect();
        assemblies.sort();

        Self {
            version: SCHEMA_VERSION.to_string(),
            verdict: verdict.to_string(),
            executable: case.executable.display().to_string(),
            trace_file: trace_file.map(|path| path.display().to_string()),
            assemblies,
            normalized_actual,
            normalized_reference,
            generated_at: Utc::now().to_rfc3339(),
        }
    }
}

/// Write a report to a JSON file, creating parent directories if needed.
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
pub fn write_report(report: &VerifyReport, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing report to: {}", output_path.display());

    if let Some(parent) = output_path.parent() {
        if !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(output_path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, report)?;

    Ok(())
}

/// Read a report back from a JSON file.
pub fn read_report(input_path: impl AsRef<Path>) -> Result<VerifyReport, OutputError> {
    let file = File::open(input_path.as_ref())?;
    let report: VerifyReport = serde_json::from_reader(file)?;
    debug!("Report loaded: verdict {}", report.verdict);
    Ok(report)
}
