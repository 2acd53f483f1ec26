//! Verification orchestration.
//!
//! One case runs the linear pipeline:
//! 1. Build the profiler environment config
//! 2. Execute the testee with the profiler attached
//! 3. Judge the optional stdout success marker
//! 4. Locate the single trace artifact
//! 5. Parse and normalize the actual trace
//! 6. Parse and normalize the reference trace
//! 7. Judge byte-equality of the two normalized strings
//!
//! There is no branching back and no retry: flaky environment issues are
//! meant to be diagnosed, not masked.

use crate::normalize::normalize;
use crate::parser::read_trace_document;
use crate::profiler::{locate_trace_artifact, Bitness, ProfilerConfig};
use crate::runner::{run, ExecutionResult};
use crate::utils::error::{SetupError, VerifyError};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::path::PathBuf;

/// Everything needed to verify one profiled run against its reference.
#[derive(Debug, Clone)]
pub struct VerifyCase {
    /// The testee executable to profile
    pub executable: PathBuf,
    /// Arguments passed to the testee
    pub arguments: Vec<String>,
    /// Working directory for the testee
    pub working_dir: PathBuf,
    /// Directory the profiler deposits its trace into; must contain no
    /// pre-existing `coverage_*` files (setup's responsibility)
    pub trace_dir: PathBuf,
    /// Directory containing the profiler modules
    pub profiler_dir: PathBuf,
    /// Bitness of the testee, selecting the module variant
    pub bitness: Bitness,
    /// Run the profiler in light mode
    pub light_mode: bool,
    /// Assembly ids whose records take part in the comparison
    pub assemblies: HashSet<String>,
    /// Curated reference trace to compare against
    pub reference_trace: PathBuf,
    /// Literal marker the testee is expected to print to stdout, if any
    pub success_marker: Option<String>,
}

/// Result of a successful (i.e. matching) verification.
#[derive(Debug, Clone)]
pub struct VerifyOutcome {
    /// The located trace artifact
    pub trace_file: PathBuf,
    /// Normalized actual trace; equal to the normalized reference
    pub normalized: String,
    /// The testee's captured execution result
    pub execution: ExecutionResult,
}

/// Run a verification case end to end.
///
/// # Errors
/// * `VerifyError::Setup` - spawn failure or missing reference (fatal)
/// * `VerifyError::Artifact` - zero or multiple trace artifacts (fatal)
/// * `VerifyError::MarkerMissing` - testee ran but did not report success
/// * `VerifyError::TraceMismatch` - normalized traces differ; carries both
///   full strings for diffing
pub fn run_case(case: &VerifyCase) -> Result<VerifyOutcome, VerifyError> {
    info!("Verifying {} against {}",
        case.executable.display(),
        case.reference_trace.display());

    // Step 1: profiler environment
    let config = ProfilerConfig::new(&case.profiler_dir, &case.trace_dir, case.bitness)
        .with_light_mode(case.light_mode);
    debug!("Profiler module: {}", config.module_path().display());

    // Step 2: run the testee with the profiler attached
    let execution = run(
        &case.executable,
        &case.arguments,
        &case.working_dir,
        &config.environment(),
    )
    .map_err(VerifyError::Setup)?;

    if !execution.success() {
        warn!("Testee exited with {:?}", execution.exit_code);
    }

    // Step 3: success marker, judged independently of the trace so a
    // testee that failed internally reports as such rather than as a
    // missing artifact
    if let Some(marker) = &case.success_marker {
        if !execution.stdout.contains(marker.as_str()) {
            return Err(VerifyError::MarkerMissing {
                marker: marker.clone(),
                stdout: execution.stdout.clone(),
            });
        }
    }

    // Step 4: exactly one trace artifact
    let trace_file = locate_trace_artifact(&case.trace_dir)?;

    // Steps 5+6: reduce both traces with the same allow-set
    let actual_document = read_trace_document(&trace_file).map_err(VerifyError::Setup)?;
    let normalized_actual = normalize(&actual_document, &case.assemblies);

    if !case.reference_trace.is_file() {
        return Err(VerifyError::Setup(SetupError::ReferenceMissing(
            case.reference_trace.clone(),
        )));
    }
    let reference_document = read_trace_document(&case.reference_trace).map_err(VerifyError::Setup)?;
    let normalized_reference = normalize(&reference_document, &case.assemblies);

    // Step 7: the normalized strings are the sole equality criterion
    if normalized_actual != normalized_reference {
        return Err(VerifyError::TraceMismatch {
            actual: normalized_actual,
            reference: normalized_reference,
        });
    }

    info!(
        "Trace matches reference ({} normalized records)",
        if normalized_actual.is_empty() { 0 } else { normalized_actual.lines().count() }
    );

    Ok(VerifyOutcome {
        trace_file,
        normalized: normalized_actual,
        execution,
    })
}
