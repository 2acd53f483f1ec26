//! Verify command implementation.
//!
//! The verify command:
//! 1. Evaluates the platform gate (skip, not fail, off-platform)
//! 2. Runs the testee under the profiler
//! 3. Normalizes the actual and the reference trace
//! 4. Judges equality and the optional success marker
//! 5. Optionally writes a JSON verdict report

use crate::gate::{self, GateDecision};
use crate::output::{write_report, VerifyReport};
use crate::profiler::Bitness;
use crate::utils::error::VerifyError;
use crate::verify::{run_case, VerifyCase};
use anyhow::{Context, Result};
use log::{info, warn};
use std::collections::HashSet;
use std::path::PathBuf;

/// Arguments for the verify command
#[derive(Debug, Clone)]
pub struct VerifyArgs {
    /// The testee executable to profile
    pub executable: PathBuf,

    /// Arguments passed to the testee
    pub arguments: Vec<String>,

    /// Working directory for the testee (defaults to the trace dir)
    pub working_dir: Option<PathBuf>,

    /// Directory the profiler writes its trace into
    pub trace_dir: PathBuf,

    /// Directory containing the profiler modules
    pub profiler_dir: PathBuf,

    /// Bitness of the testee ("32" or "64")
    pub bitness: Bitness,

    /// Run the profiler in light mode
    pub light_mode: bool,

    /// Assembly ids whose records take part in the comparison
    pub assemblies: Vec<String>,

    /// Reference trace file
    pub reference_trace: PathBuf,

    /// Literal stdout marker the testee must print, if any
    pub success_marker: Option<String>,

    /// Where to write the JSON verdict report
    pub report: Option<PathBuf>,

    /// Runtime version string for the platform gate
    pub runtime_version: Option<String>,

    /// Bypass the platform gate (for pre-gated CI images)
    pub skip_gate: bool,
}

/// What the verify command concluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyVerdict {
    /// Normalized traces match (and the marker, if any, was present)
    Pass,
    /// Platform gate decided not to run
    Skipped { reason: String },
    /// Normalized traces differ or the marker was absent
    Failed,
}

/// Execute the verify command
///
/// Setup and artifact-cardinality problems propagate as errors; a
/// comparison mismatch or missing marker is a `Failed` verdict, reported
/// with its full diagnostic payload but not a crash.
pub fn execute_verify(args: VerifyArgs) -> Result<VerifyVerdict> {
    validate_args(&args)?;

    // Consulted once, before any orchestration.
    if !args.skip_gate {
        let decision = gate::current_decision(args.runtime_version.as_deref());
        if let GateDecision::Skip { reason } = decision {
            println!("SKIPPED: {}", reason);
            return Ok(VerifyVerdict::Skipped { reason });
        }
    }

    let case = VerifyCase {
        executable: args.executable.clone(),
        arguments: args.arguments.clone(),
        working_dir: args
            .working_dir
            .clone()
            .unwrap_or_else(|| args.trace_dir.clone()),
        trace_dir: args.trace_dir.clone(),
        profiler_dir: args.profiler_dir.clone(),
        bitness: args.bitness,
        light_mode: args.light_mode,
        assemblies: args.assemblies.iter().cloned().collect::<HashSet<_>>(),
        reference_trace: args.reference_trace.clone(),
        success_marker: args.success_marker.clone(),
    };

    match run_case(&case) {
        Ok(outcome) => {
            info!("Verification passed");
            if let Some(report_path) = &args.report {
                let report = VerifyReport::new(
                    &case,
                    "pass",
                    Some(&outcome.trace_file),
                    outcome.normalized.clone(),
                    outcome.normalized,
                );
                write_report(&report, report_path).context("Failed to write verdict report")?;
            }
            println!("PASS: trace matches reference");
            Ok(VerifyVerdict::Pass)
        }

        Err(VerifyError::TraceMismatch { actual, reference }) => {
            warn!("Normalized traces differ");
            if let Some(report_path) = &args.report {
                let report =
                    VerifyReport::new(&case, "trace-mismatch", None, actual.clone(), reference.clone());
                write_report(&report, report_path).context("Failed to write verdict report")?;
            }
            println!("FAIL: the normalized contents of the trace files did not match");
            println!("--- actual ---\n{}", actual);
            println!("--- reference ---\n{}", reference);
            Ok(VerifyVerdict::Failed)
        }

        Err(VerifyError::MarkerMissing { marker, stdout }) => {
            warn!("Success marker '{}' missing from testee output", marker);
            if let Some(report_path) = &args.report {
                let report =
                    VerifyReport::new(&case, "marker-missing", None, String::new(), String::new());
                write_report(&report, report_path).context("Failed to write verdict report")?;
            }
            println!("FAIL: testee did not print success marker '{}'", marker);
            println!("--- testee stdout ---\n{}", stdout);
            Ok(VerifyVerdict::Failed)
        }

        // Setup and artifact errors are environment problems, not verdicts.
        Err(fatal) => Err(fatal).context("Verification aborted before comparison"),
    }
}

/// Validate verify arguments before doing any work
pub fn validate_args(args: &VerifyArgs) -> Result<()> {
    if args.executable.as_os_str().is_empty() {
        anyhow::bail!("Testee executable must be given");
    }

    if args.assemblies.is_empty() {
        warn!("Empty assembly allow-set: the comparison covers zero records");
    }

    if args
        .assemblies
        .iter()
        .any(|id| id.contains(crate::utils::config::KEY_SEPARATOR))
    {
        anyhow::bail!("Assembly ids must be single key fields (no ':')");
    }

    Ok(())
}
