//! Query rewriting primitives.
//!
//! Each function takes a query and returns a new one. Only the bytes that
//! the operation is about are touched; the rest of the query (spacing,
//! casing, aliases, unknown filters) is carried over verbatim. None of
//! these functions fail: a query the scanner rejects is handled as plain
//! text.

use tracing::debug;

use crate::filters::FilterType;
use crate::scanner::{scan_search_query, Token};
use crate::validate::find_filters;

/// Format a filter value for insertion into a query.
///
/// Values containing whitespace, or starting with a quote character, are
/// double-quoted with `\` and `"` escaped. Everything else is written as is.
pub fn format_filter_value(value: &str) -> String {
    let needs_quotes =
        value.starts_with(['"', '\'']) || value.chars().any(char::is_whitespace);
    if !needs_quotes {
        return value.to_string();
    }

    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Append `field:value` to the end of the query.
///
/// Trailing whitespace of the query is dropped and a single space separates
/// the new filter.
///
/// # Example
/// ```
/// use sift_query::{append_filter, FilterType};
///
/// assert_eq!(append_filter("repo:foo", FilterType::Lang, "go"), "repo:foo lang:go");
/// assert_eq!(append_filter("", FilterType::Lang, "go"), "lang:go");
/// ```
pub fn append_filter(query: &str, field: FilterType, value: &str) -> String {
    let filter = format!("{}:{}", field, format_filter_value(value));
    let trimmed = query.trim_end();
    if trimmed.is_empty() {
        filter
    } else {
        format!("{} {}", trimmed, filter)
    }
}

/// Replace the value of the first `field` filter, or append one.
///
/// Only the first non-negated filter for `field` is rewritten; later
/// occurrences are left alone. The field name is kept as written, so an
/// alias such as `r:` stays `r:`.
///
/// # Example
/// ```
/// use sift_query::{update_filter, FilterType};
///
/// assert_eq!(update_filter("repo:foo lang:ts", FilterType::Lang, "go"), "repo:foo lang:go");
/// assert_eq!(update_filter("repo:foo", FilterType::Lang, "go"), "repo:foo lang:go");
/// ```
pub fn update_filter(query: &str, field: FilterType, value: &str) -> String {
    let tokens = match scan_search_query(query) {
        Ok(tokens) => tokens,
        Err(e) => {
            debug!(error = %e, field = %field, "Query did not scan, appending filter");
            return append_filter(query, field, value);
        }
    };

    let first = find_filters(&tokens, field).next();
    match first {
        Some(filter) => {
            let range = filter.value_range.clone();
            let mut updated = String::with_capacity(query.len() + value.len());
            updated.push_str(&query[..range.start]);
            updated.push_str(&format_filter_value(value));
            updated.push_str(&query[range.end..]);
            updated
        }
        None => append_filter(query, field, value),
    }
}

/// Remove `subquery` from the query if present, otherwise append it.
///
/// The subquery is matched as a whole sequence of tokens (`lang:go` does not
/// match inside `lang:gopher`). Removal also drops one adjacent separator
/// character, preferring the one before the match. Appending adds exactly
/// one space, so toggling a subquery twice returns the original query.
///
/// # Example
/// ```
/// use sift_query::toggle_subquery;
///
/// assert_eq!(toggle_subquery("", "test"), "test");
/// assert_eq!(toggle_subquery("test", "test"), "");
/// assert_eq!(toggle_subquery("foo lang:go bar", "lang:go"), "foo bar");
/// ```
pub fn toggle_subquery(query: &str, subquery: &str) -> String {
    let needle = subquery.trim();
    if needle.is_empty() {
        return query.to_string();
    }

    let span = match (scan_search_query(query), scan_search_query(needle)) {
        (Ok(query_tokens), Ok(needle_tokens)) => {
            find_token_sequence(query, &query_tokens, needle, &needle_tokens)
        }
        (Err(e), _) | (_, Err(e)) => {
            debug!(error = %e, "Query did not scan, toggling subquery as text");
            query.find(needle).map(|start| (start, start + needle.len()))
        }
    };

    match span.or_else(|| appended_span(query, needle)) {
        Some((start, end)) => remove_span(query, start, end),
        None if query.is_empty() => needle.to_string(),
        None => format!("{} {}", query, needle),
    }
}

/// Byte span of the first run of query tokens whose texts equal the needle's
/// token texts.
fn find_token_sequence(
    query: &str,
    query_tokens: &[Token],
    needle: &str,
    needle_tokens: &[Token],
) -> Option<(usize, usize)> {
    if needle_tokens.is_empty() || needle_tokens.len() > query_tokens.len() {
        return None;
    }

    query_tokens
        .windows(needle_tokens.len())
        .find(|window| {
            window
                .iter()
                .zip(needle_tokens)
                .all(|(q, n)| q.text(query) == n.text(needle))
        })
        .and_then(|window| Some((window.first()?.range.start, window.last()?.range.end)))
}

/// Span of `needle` when it sits at the end of the query exactly as a toggle
/// appends it.
///
/// Appending to a query that does not scan can close an open quote, after
/// which the needle is no longer a token of its own. Recognizing the appended
/// form keeps a second toggle undoing the first.
fn appended_span(query: &str, needle: &str) -> Option<(usize, usize)> {
    if query == needle {
        return Some((0, query.len()));
    }
    let start = query.len().checked_sub(needle.len())?;
    let appended = query.ends_with(needle) && query[..start].ends_with(' ');
    appended.then_some((start, query.len()))
}

/// Remove `start..end` and one neighbouring whitespace character.
fn remove_span(query: &str, mut start: usize, mut end: usize) -> String {
    if let Some(c) = query[..start].chars().next_back().filter(|c| c.is_whitespace()) {
        start -= c.len_utf8();
    } else if let Some(c) = query[end..].chars().next().filter(|c| c.is_whitespace()) {
        end += c.len_utf8();
    }

    let mut result = String::with_capacity(query.len() - (end - start));
    result.push_str(&query[..start]);
    result.push_str(&query[end..]);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // format_filter_value
    // =========================================================================

    #[test]
    fn test_format_plain_value() {
        assert_eq!(format_filter_value("go"), "go");
        assert_eq!(format_filter_value(""), "");
        assert_eq!(format_filter_value("^github\\.com/a$"), "^github\\.com/a$");
    }

    #[test]
    fn test_format_value_with_whitespace() {
        assert_eq!(format_filter_value("my file.rs"), r#""my file.rs""#);
        assert_eq!(format_filter_value(r#"say "hi""#), r#""say \"hi\"""#);
    }

    #[test]
    fn test_format_value_starting_with_quote() {
        assert_eq!(format_filter_value(r#""x"#), r#""\"x""#);
    }

    // =========================================================================
    // append_filter
    // =========================================================================

    #[test]
    fn test_append_filter() {
        assert_eq!(append_filter("repo:foo", FilterType::Lang, "go"), "repo:foo lang:go");
    }

    #[test]
    fn test_append_filter_to_empty_query() {
        assert_eq!(append_filter("", FilterType::Repo, "foo"), "repo:foo");
        assert_eq!(append_filter("   ", FilterType::Repo, "foo"), "repo:foo");
    }

    #[test]
    fn test_append_filter_drops_trailing_whitespace() {
        assert_eq!(append_filter("foo  \t", FilterType::File, "x"), "foo file:x");
    }

    #[test]
    fn test_append_filter_keeps_leading_text_verbatim() {
        assert_eq!(append_filter("  a   b", FilterType::Case, "yes"), "  a   b case:yes");
    }

    #[test]
    fn test_append_filter_quotes_value() {
        assert_eq!(
            append_filter("x", FilterType::File, "a b.rs"),
            r#"x file:"a b.rs""#
        );
    }

    #[test]
    fn test_append_filter_to_unscannable_query() {
        assert_eq!(
            append_filter(r#"foo "bar"#, FilterType::Lang, "go"),
            r#"foo "bar lang:go"#
        );
    }

    // =========================================================================
    // update_filter
    // =========================================================================

    #[test]
    fn test_update_filter_replaces_value_in_place() {
        assert_eq!(
            update_filter("repo:foo lang:ts  bar", FilterType::Lang, "go"),
            "repo:foo lang:go  bar"
        );
    }

    #[test]
    fn test_update_filter_appends_when_missing() {
        assert_eq!(update_filter("repo:foo", FilterType::Lang, "go"), "repo:foo lang:go");
        assert_eq!(update_filter("", FilterType::Lang, "go"), "lang:go");
    }

    #[test]
    fn test_update_filter_only_touches_first_occurrence() {
        assert_eq!(
            update_filter("lang:ts x lang:js", FilterType::Lang, "go"),
            "lang:go x lang:js"
        );
    }

    #[test]
    fn test_update_filter_keeps_alias() {
        assert_eq!(update_filter("r:foo", FilterType::Repo, "bar"), "r:bar");
    }

    #[test]
    fn test_update_filter_skips_negated() {
        assert_eq!(
            update_filter("-lang:ts", FilterType::Lang, "go"),
            "-lang:ts lang:go"
        );
    }

    #[test]
    fn test_update_filter_empty_value() {
        assert_eq!(update_filter("lang: x", FilterType::Lang, "go"), "lang:go x");
    }

    #[test]
    fn test_update_filter_replaces_quoted_value() {
        assert_eq!(
            update_filter(r#"file:"a b.rs" x"#, FilterType::File, "c.rs"),
            "file:c.rs x"
        );
        assert_eq!(
            update_filter("file:c.rs x", FilterType::File, "a b.rs"),
            r#"file:"a b.rs" x"#
        );
    }

    #[test]
    fn test_update_filter_inside_parentheses() {
        assert_eq!(
            update_filter("(repo:a or x)", FilterType::Repo, "b"),
            "(repo:b or x)"
        );
    }

    #[test]
    fn test_update_filter_unscannable_falls_back_to_append() {
        assert_eq!(
            update_filter(r#"lang:ts "open"#, FilterType::Lang, "go"),
            r#"lang:ts "open lang:go"#
        );
    }

    // =========================================================================
    // toggle_subquery
    // =========================================================================

    #[test]
    fn test_toggle_adds_to_empty_query() {
        assert_eq!(toggle_subquery("", "test"), "test");
    }

    #[test]
    fn test_toggle_removes_only_token() {
        assert_eq!(toggle_subquery("test", "test"), "");
    }

    #[test]
    fn test_toggle_appends() {
        assert_eq!(toggle_subquery("repo:foo", "lang:go"), "repo:foo lang:go");
    }

    #[test]
    fn test_toggle_removes_from_middle() {
        assert_eq!(toggle_subquery("a lang:go b", "lang:go"), "a b");
    }

    #[test]
    fn test_toggle_removes_from_start() {
        assert_eq!(toggle_subquery("lang:go b", "lang:go"), "b");
    }

    #[test]
    fn test_toggle_removes_from_end() {
        assert_eq!(toggle_subquery("a lang:go", "lang:go"), "a");
    }

    #[test]
    fn test_toggle_matches_whole_tokens_only() {
        assert_eq!(
            toggle_subquery("lang:gopher", "lang:go"),
            "lang:gopher lang:go"
        );
    }

    #[test]
    fn test_toggle_multi_token_subquery() {
        assert_eq!(
            toggle_subquery("x type:diff select:commit y", "type:diff select:commit"),
            "x y"
        );
    }

    #[test]
    fn test_toggle_trims_subquery() {
        assert_eq!(toggle_subquery("foo", "  bar "), "foo bar");
        assert_eq!(toggle_subquery("foo bar", " bar"), "foo");
    }

    #[test]
    fn test_toggle_empty_subquery_is_noop() {
        assert_eq!(toggle_subquery("foo  ", "   "), "foo  ");
    }

    #[test]
    fn test_toggle_is_self_inverse_when_absent() {
        for query in ["", "foo", "foo ", "  a  b  ", "(repo:a or repo:b)", "héllo"] {
            let once = toggle_subquery(query, "case:yes");
            assert_eq!(toggle_subquery(&once, "case:yes"), query, "query {:?}", query);
        }
    }

    #[test]
    fn test_toggle_unscannable_query_uses_text() {
        assert_eq!(toggle_subquery(r#"x "y z"#, "z"), r#"x "y"#);
        assert_eq!(toggle_subquery(r#"x "y"#, "z"), r#"x "y z"#);
    }

    #[test]
    fn test_toggle_closing_quote_is_self_inverse() {
        // Appending `b"` closes the open quote, so the needle is swallowed
        // into a quoted token on the way back.
        let once = toggle_subquery(r#"x "a"#, r#"b""#);
        assert_eq!(once, r#"x "a b""#);
        assert_eq!(toggle_subquery(&once, r#"b""#), r#"x "a"#);
    }

    #[test]
    fn test_toggle_removes_appended_suffix_only_after_space() {
        assert_eq!(toggle_subquery("xb", "b"), "xb b");
    }
}
