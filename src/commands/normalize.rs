//! Normalize command implementation.
//!
//! Applies the same reduction the comparator uses to a single trace file,
//! so a failing reference can be regenerated or diffed by hand.

use crate::normalize::normalize;
use crate::parser::read_trace_document;
use anyhow::{Context, Result};
use log::info;
use std::collections::HashSet;
use std::path::PathBuf;

/// Arguments for the normalize command
#[derive(Debug, Clone)]
pub struct NormalizeArgs {
    /// Trace file to normalize
    pub trace_file: PathBuf,

    /// Assembly ids to keep
    pub assemblies: Vec<String>,

    /// Write the normalized trace here instead of stdout
    pub output: Option<PathBuf>,
}

/// Execute the normalize command
pub fn execute_normalize(args: NormalizeArgs) -> Result<()> {
    let document = read_trace_document(&args.trace_file)
        .with_context(|| format!("Failed to read trace {}", args.trace_file.display()))?;

    let allow: HashSet<String> = args.assemblies.iter().cloned().collect();
    let normalized = normalize(&document, &allow);

    info!(
        "Normalized {} to {} records",
        args.trace_file.display(),
        if normalized.is_empty() { 0 } else { normalized.lines().count() }
    );

    match &args.output {
        Some(path) => {
            std::fs::write(path, &normalized)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        None => println!("{}", normalized),
    }

    Ok(())
}
