//! Coverage Verify
//!
//! Regression verification harness for the .NET coverage profiler.
//!
//! Runs an instrumented target program with the profiler activated through
//! environment variables, locates the trace file the profiler deposits,
//! reduces actual and reference trace to a canonical normalized form and
//! judges the run by byte-equality of the two normalized strings.
//!
//! This crate provides the core implementation for the
//! `coverage-verify` CLI tool.

pub mod commands;
pub mod gate;
pub mod normalize;
pub mod output;
pub mod parser;
pub mod profiler;
pub mod runner;
pub mod utils;
pub mod verify;
