//! Platform precondition gate.
//!
//! The profiler is a native Windows module bound to the .NET 4+ runtime, so
//! on any other platform the whole verification is meaningless. That is a
//! *skip*, not a failure: the gate is consulted exactly once before the
//! orchestration starts and is deliberately separate from the error
//! taxonomy in `utils::error`.

use log::info;

/// Whether the surrounding verification should run at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Preconditions hold; run the verification.
    Run,
    /// Preconditions not met; skip without failing.
    Skip { reason: String },
}

impl GateDecision {
    /// True if the verification should proceed.
    pub fn should_run(&self) -> bool {
        matches!(self, GateDecision::Run)
    }
}

/// Evaluate the gate for a given OS family and runtime version string.
///
/// Requires the `windows` OS family and a .NET product version of 4 or
/// newer. The version string is whatever the runtime reports, e.g.
/// `"4.8.4645.0"`; `None` means the runtime version could not be
/// determined, which is also a skip.
pub fn evaluate(os_family: &str, runtime_version: Option<&str>) -> GateDecision {
    if os_family != "windows" {
        return GateDecision::Skip {
            reason: format!("Profiler only runs on Windows (current OS: {})", os_family),
        };
    }

    match runtime_version {
        Some(version) if is_dotnet4_or_newer(version) => GateDecision::Run,
        Some(version) => GateDecision::Skip {
            reason: format!("Profiler only runs on .NET 4 and newer (found: {})", version),
        },
        None => GateDecision::Skip {
            reason: "Could not determine the installed .NET runtime version".to_string(),
        },
    }
}

/// Evaluate the gate for the current process's OS.
pub fn current_decision(runtime_version: Option<&str>) -> GateDecision {
    let decision = evaluate(std::env::consts::OS, runtime_version);
    if let GateDecision::Skip { reason } = &decision {
        info!("Gate skipped verification: {}", reason);
    }
    decision
}

/// True if the major version of a dotted product version is >= 4.
fn is_dotnet4_or_newer(version: &str) -> bool {
    version
        .split('.')
        .next()
        .and_then(|major| major.trim().parse::<u32>().ok())
        .map(|major| major >= 4)
        .unwrap_or(false)
}
