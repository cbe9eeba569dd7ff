//! Ordered query updates.
//!
//! UI actions (clicking a filter suggestion, toggling a sidebar entry)
//! describe what they want done to the query as a list of [`QueryUpdate`]s.
//! [`update_query`] folds them over the query in order, each update seeing
//! the result of the previous one.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::filters::FilterType;
use crate::transformer::{append_filter, toggle_subquery, update_filter};
use crate::validate::filter_exists;

/// One mutation to apply to a query.
///
/// Serialized with a `type` tag, e.g.
/// `{"type": "appendFilter", "field": "lang", "value": "go", "unique": true}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum QueryUpdate {
    /// Append `field:value`. When `unique` is set and a filter for `field`
    /// already exists, the update is ignored.
    AppendFilter {
        field: FilterType,
        value: String,
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        unique: bool,
    },

    /// Replace the value of the first `field` filter, or append one.
    UpdateOrAppendFilter { field: FilterType, value: String },

    /// Remove `value` if present as whole tokens, otherwise append it.
    /// Intended for sidebar entries that already come in `field:value` form.
    ToggleSubquery { value: String },
}

impl QueryUpdate {
    /// Append a filter unconditionally.
    pub fn append(field: FilterType, value: impl Into<String>) -> Self {
        Self::AppendFilter {
            field,
            value: value.into(),
            unique: false,
        }
    }

    /// Append a filter unless one for the same field exists.
    pub fn append_unique(field: FilterType, value: impl Into<String>) -> Self {
        Self::AppendFilter {
            field,
            value: value.into(),
            unique: true,
        }
    }

    /// Update the first filter for `field`, or append one.
    pub fn update_or_append(field: FilterType, value: impl Into<String>) -> Self {
        Self::UpdateOrAppendFilter {
            field,
            value: value.into(),
        }
    }

    /// Toggle a subquery in or out of the query.
    pub fn toggle(value: impl Into<String>) -> Self {
        Self::ToggleSubquery {
            value: value.into(),
        }
    }

    /// Operation name used in log events.
    pub fn op(&self) -> &'static str {
        match self {
            Self::AppendFilter { .. } => "append_filter",
            Self::UpdateOrAppendFilter { .. } => "update_or_append_filter",
            Self::ToggleSubquery { .. } => "toggle_subquery",
        }
    }
}

/// Apply `updates` to `query` in order.
///
/// An empty update list returns the query unchanged, and an update that has
/// nothing to do (a unique append whose field is already present) leaves
/// the query byte-identical.
///
/// # Example
/// ```
/// use sift_query::{update_query, FilterType, QueryUpdate};
///
/// let query = update_query(
///     "repo:foo",
///     &[QueryUpdate::append_unique(FilterType::Lang, "go")],
/// );
/// assert_eq!(query, "repo:foo lang:go");
/// ```
pub fn update_query(query: &str, updates: &[QueryUpdate]) -> String {
    let updated = updates
        .iter()
        .fold(query.to_string(), |query, update| apply_update(query, update));

    debug!(
        component = "pipeline",
        update_count = updates.len(),
        changed = updated != query,
        "Applied query updates"
    );
    updated
}

fn apply_update(query: String, update: &QueryUpdate) -> String {
    let updated = match update {
        QueryUpdate::AppendFilter {
            field,
            value,
            unique,
        } => {
            if *unique && filter_exists(&query, *field) {
                debug!(field = %field, "Filter already present, skipping unique append");
                return query;
            }
            append_filter(&query, *field, value)
        }
        QueryUpdate::UpdateOrAppendFilter { field, value } => update_filter(&query, *field, value),
        QueryUpdate::ToggleSubquery { value } => toggle_subquery(&query, value),
    };

    trace!(op = update.op(), query = %updated, "Applied update");
    updated
}
