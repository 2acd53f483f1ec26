//! Synchronous child-process execution with captured output.
//!
//! The harness runs exactly one testee at a time and waits for it to exit
//! before looking at the trace directory, so there is never an overlap
//! between "process running" and "trace parsing". There is deliberately no
//! timeout: a hung testee stalls the calling test indefinitely, which is
//! acceptable for a CI-triggered correctness check.

use crate::utils::error::SetupError;
use log::{debug, info};
use std::path::Path;
use std::process::Command;

/// Captured outcome of a completed child process.
///
/// A non-zero exit code is data, not an error - the caller decides what it
/// means for the test.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Exit code; `None` if the process was terminated by a signal
    pub exit_code: Option<i32>,
    /// Full standard output, captured in memory
    pub stdout: String,
    /// Full standard error, captured in memory
    pub stderr: String,
}

impl ExecutionResult {
    /// True if the process exited with code 0.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Run a program to completion and capture its output.
///
/// The child inherits the current environment with `env_overrides` applied
/// on top. Blocks until the child terminates.
///
/// # Arguments
/// * `program` - Path to the executable
/// * `args` - Argument vector (without the program name)
/// * `working_dir` - Working directory for the child
/// * `env_overrides` - Environment entries set on top of the inherited ones
///
/// # Errors
/// * `SetupError::SpawnFailed` - the process could not be started at all
///   (missing binary, permission denied); distinct from a non-zero exit
pub fn run(
    program: impl AsRef<Path>,
    args: &[String],
    working_dir: impl AsRef<Path>,
    env_overrides: &[(String, String)],
) -> Result<ExecutionResult, SetupError> {
    let program = program.as_ref();

    info!("Running {} {}", program.display(), args.join(" "));
    for (key, value) in env_overrides {
        debug!("  env {}={}", key, value);
    }

    let output = Command::new(program)
        .args(args)
        .current_dir(working_dir.as_ref())
        .envs(env_overrides.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .output()
        .map_err(|source| SetupError::SpawnFailed {
            program: program.display().to_string(),
            source,
        })?;

    let result = ExecutionResult {
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };

    debug!(
        "Process exited with {:?} ({} bytes stdout, {} bytes stderr)",
        result.exit_code,
        result.stdout.len(),
        result.stderr.len()
    );

    Ok(result)
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
    use super::*;

    #[test]
    fn test_captures_stdout_and_exit_code() {
        let result = run(
            "/bin/sh",
            &["-c".to_string(), "echo hello".to_string()],
            ".",
            &[],
        )
        .unwrap();
        assert!(result.success());
        assert_eq!(result.stdout.trim(), "hello");
    }

    #[test]
    fn test_nonzero_exit_is_not_an_error() {
        let result = run(
            "/bin/sh",
            &["-c".to_string(), "exit 3".to_string()],
            ".",
            &[],
        )
        .unwrap();
        assert!(!result.success());
        assert_eq!(result.exit_code, Some(3));
    }

    #[test]
    fn test_env_overrides_reach_the_child() {
        let result = run(
            "/bin/sh",
            &["-c".to_string(), "printf %s \"$COR_ENABLE_PROFILING\"".to_string()],
            ".",
            &[("COR_ENABLE_PROFILING".to_string(), "1".to_string())],
        )
        .unwrap();
        assert_eq!(result.stdout, "1");
    }

    #[test]
    fn test_missing_binary_is_setup_error() {
        let result = run("/nonexistent/testee.exe", &[], ".", &[]);
        assert!(matches!(result, Err(SetupError::SpawnFailed { .. })));
    }
}
