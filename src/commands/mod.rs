//! CLI command implementations.

pub mod normalize;
pub mod verify;

pub use normalize::{execute_normalize, NormalizeArgs};
pub use verify::{execute_verify, validate_args, VerifyArgs, VerifyVerdict};
