//! Read-only checks against a query.

use tracing::debug;

use crate::filters::FilterType;
use crate::scanner::{scan_search_query, FilterToken, Token};

/// Returns true when the query contains a non-negated filter for `field`.
///
/// Aliases count (`r:foo` satisfies [`FilterType::Repo`]). A query that
/// cannot be scanned is treated as having no filters.
///
/// # Example
/// ```
/// use sift_query::{filter_exists, FilterType};
///
/// assert!(filter_exists("r:sift lang:rust", FilterType::Repo));
/// assert!(!filter_exists("-lang:go", FilterType::Lang));
/// ```
pub fn filter_exists(query: &str, field: FilterType) -> bool {
    match scan_search_query(query) {
        Ok(tokens) => find_filters(&tokens, field).next().is_some(),
        Err(e) => {
            debug!(error = %e, field = %field, "Query did not scan, assuming filter absent");
            false
        }
    }
}

/// Non-negated filters in `tokens` that resolve to `field`, in query order.
pub fn find_filters(tokens: &[Token], field: FilterType) -> impl Iterator<Item = &FilterToken> {
    tokens
        .iter()
        .filter_map(Token::as_filter)
        .filter(move |f| !f.negated && f.filter_type() == Some(field))
}
