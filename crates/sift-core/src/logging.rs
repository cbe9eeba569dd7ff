//! Structured logging field names for sift.
//!
//! All crates use these constants for consistent `tracing` fields, so log
//! pipelines can filter on the same keys regardless of which crate emitted
//! the event.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Command failed, nothing was produced |
//! | WARN  | Recoverable issue, default or fallback applied |
//! | INFO  | Lifecycle events (startup), command completions |
//! | DEBUG | Decision points (skipped appends, scanner fallbacks) |
//! | TRACE | Per-item iteration (each update, each token) |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Component within the workspace.
/// Examples: "scanner", "transformer", "pipeline", "line_chart"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "append_filter", "update_filter", "toggle_subquery"
pub const OPERATION: &str = "op";

// ─── Query fields ──────────────────────────────────────────────────────────

/// Search query text.
pub const QUERY: &str = "query";

/// Filter field name.
pub const FIELD: &str = "field";

/// Number of updates applied to a query.
pub const UPDATE_COUNT: &str = "update_count";

/// Number of tokens produced by the scanner.
pub const TOKEN_COUNT: &str = "token_count";

// ─── Result fields ─────────────────────────────────────────────────────────

/// Number of matches in a match group.
pub const MATCH_COUNT: &str = "match_count";

/// Number of series in a chart.
pub const SERIES_COUNT: &str = "series_count";

/// Number of data points in a chart.
pub const POINT_COUNT: &str = "point_count";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Whether an update changed the query.
pub const CHANGED: &str = "changed";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
