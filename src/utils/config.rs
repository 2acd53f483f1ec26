//! Configuration and constants for the harness.

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

// Environment variables the CLR inspects to activate a profiler.
// These names are fixed by the runtime, not by us.
/// Enables profiling for the child process
pub const PROFILER_ENABLE_KEY: &str = "COR_ENABLE_PROFILING";
/// Class id of the profiler to load
pub const PROFILER_CLASS_ID_KEY: &str = "COR_PROFILER";
/// Directory the profiler writes traces into
pub const PROFILER_TARGETDIR_KEY: &str = "COR_PROFILER_TARGETDIR";
/// Path to the profiler's loadable module
pub const PROFILER_PATH_KEY: &str = "COR_PROFILER_PATH";
/// Enables the profiler's reduced-instrumentation light mode
pub const PROFILER_LIGHT_MODE_KEY: &str = "COR_PROFILER_LIGHT_MODE";

/// The profiler's COM class id
pub const PROFILER_CLASS_ID: &str = "{DD0A1BB6-11CE-11DD-8EE8-3F9E55D89593}";

/// Label with which jitted methods are prefixed in the trace
pub const LABEL_JITTED: &str = "Jitted";

/// Label with which inlined methods are prefixed in the trace
pub const LABEL_INLINED: &str = "Inlined";

/// Separator between the label and the record in a trace line
pub const LABEL_SEPARATOR: char = '=';

/// Separator used to concatenate the fields of a record's composite key
pub const KEY_SEPARATOR: char = ':';

/// Prefix of comment lines in a trace file
pub const COMMENT_PREFIX: &str = "//";

/// Prefix of the trace files the profiler writes.
/// The suffix is non-deterministic (process id and timestamp).
pub const TRACE_FILE_PREFIX: &str = "coverage_";

/// Stdout marker a well-behaved testee prints on success
pub const DEFAULT_SUCCESS_MARKER: &str = "SUCCESS";
