//! Default constants for sift.
//!
//! Shared default values live here so the config loader, the CLI, and the
//! crates that take explicit parameters agree on them.

// =============================================================================
// SEARCH
// =============================================================================

/// Pattern type used when none is configured.
pub const PATTERN_TYPE: &str = "standard";

/// Case sensitivity used when none is configured.
pub const CASE_SENSITIVE: bool = false;

// =============================================================================
// RESULTS
// =============================================================================

/// Lines of trailing context kept after the last match when a match group is
/// truncated.
pub const MATCH_CONTEXT_LINES: usize = 1;

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Environment variable overriding [`PATTERN_TYPE`].
pub const ENV_PATTERN_TYPE: &str = "SIFT_PATTERN_TYPE";

/// Environment variable overriding [`CASE_SENSITIVE`].
pub const ENV_CASE_SENSITIVE: &str = "SIFT_CASE_SENSITIVE";

/// Environment variable overriding [`MATCH_CONTEXT_LINES`].
pub const ENV_MATCH_CONTEXT_LINES: &str = "SIFT_MATCH_CONTEXT_LINES";
