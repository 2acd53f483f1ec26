//! Verdict report output.

pub mod report;

pub use report::{read_report, write_report, VerifyReport};
