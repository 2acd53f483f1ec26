//! Coverage Verify CLI
//!
//! Runs instrumented target programs under the .NET coverage profiler and
//! compares the resulting trace against a curated reference, modulo
//! environment-dependent noise.

use anyhow::Result;
use clap::{Parser, Subcommand};
use coverage_verify::commands::{
    execute_normalize, execute_verify, NormalizeArgs, VerifyArgs, VerifyVerdict,
};
use coverage_verify::profiler::Bitness;
use coverage_verify::utils::config::{DEFAULT_SUCCESS_MARKER, SCHEMA_VERSION};
use env_logger::Env;
use std::path::PathBuf;
use std::process::ExitCode;

/// Coverage Verify - regression harness for the .NET coverage profiler
#[derive(Parser, Debug)]
#[command(name = "coverage-verify")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a testee under the profiler and compare against a reference trace
    Verify {
        /// Path to the testee executable
        #[arg(short, long)]
        exe: PathBuf,

        /// Arguments passed to the testee
        #[arg(long)]
        arg: Vec<String>,

        /// Working directory for the testee (defaults to the trace dir)
        #[arg(long)]
        working_dir: Option<PathBuf>,

        /// Directory the profiler writes its trace into (must be clean)
        #[arg(short, long)]
        trace_dir: PathBuf,

        /// Directory containing Profiler32.dll / Profiler64.dll
        #[arg(short, long)]
        profiler_dir: PathBuf,

        /// Bitness of the testee
        #[arg(long, default_value = "64", value_parser = parse_bitness)]
        bitness: Bitness,

        /// Run the profiler in light mode
        #[arg(long)]
        light: bool,

        /// Assembly id to compare (repeatable)
        #[arg(short, long = "assembly")]
        assemblies: Vec<String>,

        /// Reference trace file
        #[arg(short, long)]
        reference: PathBuf,

        /// Literal marker the testee must print to stdout
        /// (no value: the conventional "SUCCESS")
        #[arg(long, num_args = 0..=1, default_missing_value = DEFAULT_SUCCESS_MARKER)]
        marker: Option<String>,

        /// Write a JSON verdict report to this path
        #[arg(long)]
        report: Option<PathBuf>,

        /// Installed .NET runtime version, for the platform gate
        #[arg(long)]
        runtime_version: Option<String>,

        /// Bypass the platform gate (pre-gated CI images)
        #[arg(long)]
        skip_gate: bool,
    },

    /// Print the normalized form of a trace file
    Normalize {
        /// Trace file to normalize
        #[arg(short, long)]
        file: PathBuf,

        /// Assembly id to keep (repeatable)
        #[arg(short, long = "assembly")]
        assemblies: Vec<String>,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

fn parse_bitness(value: &str) -> Result<Bitness, String> {
    Bitness::parse(value).ok_or_else(|| format!("Invalid bitness '{}', expected 32 or 64", value))
}

fn main() -> Result<ExitCode> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Verify {
            exe,
            arg,
            working_dir,
            trace_dir,
            profiler_dir,
            bitness,
            light,
            assemblies,
            reference,
            marker,
            report,
            runtime_version,
            skip_gate,
        } => {
            let args = VerifyArgs {
                executable: exe,
                arguments: arg,
                working_dir,
                trace_dir,
                profiler_dir,
                bitness,
                light_mode: light,
                assemblies,
                reference_trace: reference,
                success_marker: marker,
                report,
                runtime_version,
                skip_gate,
            };

            match execute_verify(args)? {
                VerifyVerdict::Pass | VerifyVerdict::Skipped { .. } => Ok(ExitCode::SUCCESS),
                VerifyVerdict::Failed => Ok(ExitCode::FAILURE),
            }
        }

        Commands::Normalize { file, assemblies, output } => {
            execute_normalize(NormalizeArgs {
                trace_file: file,
                assemblies,
                output,
            })?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Version => {
            display_version();
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Display version information
fn display_version() {
    println!("Coverage Verify v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Regression verification harness for the .NET coverage profiler.");
}
