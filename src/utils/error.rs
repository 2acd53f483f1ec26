//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors while setting up a profiled run.
///
/// These abort the current case before any comparison happens. A non-zero
/// exit code of the child is *not* a setup error; it is reported as part of
/// the execution result for the caller to judge.
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Failed to spawn process '{program}': {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Reference trace not found: {0}")]
    ReferenceMissing(PathBuf),

    #[error("Profiler module not found: {0}")]
    ProfilerModuleMissing(PathBuf),
}

/// Cardinality violations when locating the profiler's trace artifact.
///
/// Exactly one `coverage_*` file must exist after a profiled run. Zero
/// means the profiler never attached; more than one means the target
/// directory was contaminated by an earlier run. Neither is silently
/// resolved by picking a file.
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("No coverage trace was written to {0}")]
    Missing(PathBuf),

    #[error("More than one coverage trace was written: {}", .candidates.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", "))]
    Ambiguous { candidates: Vec<PathBuf> },
}

/// Errors that can occur during report output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Outcome errors of a verification case.
///
/// `Setup` and `Artifact` are fatal environment problems; `TraceMismatch`
/// and `MarkerMissing` are genuine test failures and carry their full
/// diagnostic payload so callers can diff without re-running.
#[derive(Error, Debug)]
pub enum VerifyError {
    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error("The normalized contents of the trace files did not match\n--- actual ---\n{actual}\n--- reference ---\n{reference}")]
    TraceMismatch { actual: String, reference: String },

    #[error("Success marker '{marker}' not found in testee output:\n{stdout}")]
    MarkerMissing { marker: String, stdout: String },
}
