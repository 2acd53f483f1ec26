//! Profiler session: environment activation and trace artifact location.
//!
//! The profiler itself is an opaque native module. Our contract with it is
//! narrow: a handful of `COR_*` environment variables activate it for a
//! child process, and afterwards it leaves exactly one `coverage_*` file in
//! the configured target directory. Both sides of that contract live here.

use crate::utils::config::{
    PROFILER_CLASS_ID, PROFILER_CLASS_ID_KEY, PROFILER_ENABLE_KEY, PROFILER_LIGHT_MODE_KEY,
    PROFILER_PATH_KEY, PROFILER_TARGETDIR_KEY, TRACE_FILE_PREFIX,
};
use crate::utils::error::ArtifactError;
use log::debug;
use std::fmt;
use std::path::{Path, PathBuf};

/// Bitness of the profiled process, selecting the profiler module variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bitness {
    X86,
    X64,
}

impl Bitness {
    /// Suffix used in the profiler module file name ("32" or "64").
    pub fn suffix(self) -> &'static str {
        match self {
            Bitness::X86 => "32",
            Bitness::X64 => "64",
        }
    }

    /// Parse from the CLI form ("32" or "64").
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "32" => Some(Bitness::X86),
            "64" => Some(Bitness::X64),
            _ => None,
        }
    }
}

impl fmt::Display for Bitness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Environment configuration that activates the profiler for one child.
///
/// Constructed fresh per run, never persisted.
#[derive(Debug, Clone)]
pub struct ProfilerConfig {
    module_path: PathBuf,
    target_dir: PathBuf,
    light_mode: bool,
    bitness: Bitness,
}

impl ProfilerConfig {
    /// Create a config loading the bitness-matching module from
    /// `profiler_dir` and directing traces into `target_dir`.
    pub fn new(
        profiler_dir: impl AsRef<Path>,
        target_dir: impl AsRef<Path>,
        bitness: Bitness,
    ) -> Self {
        let module_path = profiler_dir
            .as_ref()
            .join(format!("Profiler{}.dll", bitness.suffix()));
        Self {
            module_path,
            target_dir: target_dir.as_ref().to_path_buf(),
            light_mode: false,
            bitness,
        }
    }

    /// Enable or disable light mode (default: disabled).
    pub fn with_light_mode(mut self, light_mode: bool) -> Self {
        self.light_mode = light_mode;
        self
    }

    /// Path to the profiler module this config loads.
    pub fn module_path(&self) -> &Path {
        &self.module_path
    }

    /// Directory the profiler will write its trace into.
    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    /// Bitness variant this config selects.
    pub fn bitness(&self) -> Bitness {
        self.bitness
    }

    /// The environment variables to set on the child process.
    ///
    /// The light-mode variable is present only when light mode is enabled;
    /// its absence, not a `0` value, is what signals "disabled" to the
    /// profiler. Callers must not assume a default-false entry exists.
    pub fn environment(&self) -> Vec<(String, String)> {
        let mut env = vec![
            (
                PROFILER_PATH_KEY.to_string(),
                self.module_path.display().to_string(),
            ),
            (
                PROFILER_TARGETDIR_KEY.to_string(),
                self.target_dir.display().to_string(),
            ),
            (
                PROFILER_CLASS_ID_KEY.to_string(),
                PROFILER_CLASS_ID.to_string(),
            ),
            (PROFILER_ENABLE_KEY.to_string(), "1".to_string()),
        ];
        if self.light_mode {
            env.push((PROFILER_LIGHT_MODE_KEY.to_string(), "1".to_string()));
        }
        env
    }
}

/// Locate the single trace artifact the profiler wrote into `directory`.
///
/// The profiler suffixes its output names non-deterministically (process id
/// and timestamp), so the caller cannot predict the exact file name; only
/// the `coverage_` prefix is stable. The scan is non-recursive.
///
/// # Errors
/// * `ArtifactError::Missing` - no matching file; the profiler never attached
/// * `ArtifactError::Ambiguous` - more than one match; the target directory
///   was contaminated by an earlier run. Never silently picks the first.
pub fn locate_trace_artifact(directory: impl AsRef<Path>) -> Result<PathBuf, ArtifactError> {
    let directory = directory.as_ref();

    let mut candidates: Vec<PathBuf> = std::fs::read_dir(directory)
        .map_err(|_| ArtifactError::Missing(directory.to_path_buf()))?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter(|entry| {
            entry
                .file_name()
                .to_string_lossy()
                .starts_with(TRACE_FILE_PREFIX)
        })
        .map(|entry| entry.path())
        .collect();

    match candidates.len() {
        0 => Err(ArtifactError::Missing(directory.to_path_buf())),
        1 => {
            let artifact = candidates.remove(0);
            debug!("Located trace artifact: {}", artifact.display());
            Ok(artifact)
        }
        _ => {
            candidates.sort();
            Err(ArtifactError::Ambiguous { candidates })
        }
    }
}
