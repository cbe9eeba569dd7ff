//! Match groups and their truncation.
//!
//! A match group is a contiguous excerpt of a file (`blob_lines`, covering
//! `start_line..end_line`) together with the matches highlighted inside it.
//! Long excerpts are cut down to a match budget with [`limit_group`].

use serde::{Deserialize, Serialize};
use sift_core::{defaults, SearchConfig};
use tracing::trace;

/// A zero-based line/character position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub character: usize,
}

/// One highlighted match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchItem {
    /// Zero-based line of the match in the file.
    pub line: usize,
    pub character: usize,
    pub highlight_length: usize,
    /// Whether the match lies in a context line rather than a matched line.
    pub is_in_context: bool,
}

/// A file excerpt with its matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchGroup {
    /// Lines `start_line..end_line` of the file.
    pub blob_lines: Vec<String>,
    /// Matches ordered by position.
    pub matches: Vec<MatchItem>,
    /// Position the excerpt links to.
    pub position: Position,
    pub start_line: usize,
    /// Exclusive.
    pub end_line: usize,
}

/// Truncate `group` to `limit` matches, keeping one line of trailing context.
///
/// See [`limit_group_with_context`].
pub fn limit_group(group: MatchGroup, limit: usize) -> MatchGroup {
    limit_group_with_context(group, limit, defaults::MATCH_CONTEXT_LINES)
}

/// Truncate `group` using the configured trailing context.
pub fn limit_group_with_config(group: MatchGroup, limit: usize, config: &SearchConfig) -> MatchGroup {
    limit_group_with_context(group, limit, config.match_context_lines)
}

/// Truncate `group` to `limit` matches.
///
/// A group with at most `limit` matches is returned unchanged. Otherwise the
/// excerpt ends `context_after` lines after the line of the last kept match
/// (never past the original end), and every match on a kept line survives,
/// even when that exceeds `limit`. A limit of zero empties the group.
pub fn limit_group_with_context(
    mut group: MatchGroup,
    limit: usize,
    context_after: usize,
) -> MatchGroup {
    if group.matches.len() <= limit {
        return group;
    }

    let end_line = match limit.checked_sub(1).and_then(|i| group.matches.get(i)) {
        Some(last) => last
            .line
            .saturating_add(1)
            .saturating_add(context_after)
            .min(group.end_line)
            .max(group.start_line),
        None => group.start_line,
    };

    group.matches.retain(|m| m.line < end_line);
    group
        .blob_lines
        .truncate(end_line.saturating_sub(group.start_line));
    group.end_line = end_line;

    trace!(
        match_count = group.matches.len(),
        end_line,
        "Limited match group"
    );
    group
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(line: usize, character: usize, highlight_length: usize) -> MatchItem {
        MatchItem {
            line,
            character,
            highlight_length,
            is_in_context: false,
        }
    }

    fn group(matches: Vec<MatchItem>) -> MatchGroup {
        MatchGroup {
            blob_lines: vec!["line0".into(), "line1".into(), "line2".into()],
            matches,
            position: Position {
                line: 1,
                character: 1,
            },
            start_line: 0,
            end_line: 3,
        }
    }

    #[test]
    fn test_truncates_a_group() {
        let limited = limit_group(group(vec![item(0, 0, 1), item(2, 0, 1)]), 1);

        let expected = MatchGroup {
            blob_lines: vec!["line0".into(), "line1".into()],
            matches: vec![item(0, 0, 1)],
            position: Position {
                line: 1,
                character: 1,
            },
            start_line: 0,
            end_line: 2,
        };
        assert_eq!(limited, expected);
    }

    #[test]
    fn test_preserves_group_within_limit() {
        let original = group(vec![item(0, 0, 1)]);
        assert_eq!(limit_group(original.clone(), 10), original);
    }

    #[test]
    fn test_keeps_match_on_context_line() {
        let limited = limit_group(group(vec![item(0, 0, 1), item(1, 0, 1)]), 1);
        assert_eq!(limited.matches, vec![item(0, 0, 1), item(1, 0, 1)]);
        assert_eq!(limited.blob_lines, vec!["line0", "line1"]);
        assert_eq!(limited.end_line, 2);
    }

    #[test]
    fn test_keeps_second_match_on_same_line() {
        let limited = limit_group(group(vec![item(0, 0, 1), item(0, 2, 3)]), 1);
        assert_eq!(limited.matches, vec![item(0, 0, 1), item(0, 2, 3)]);
        assert_eq!(limited.blob_lines, vec!["line0", "line1"]);
        assert_eq!(limited.end_line, 2);
    }

    #[test]
    fn test_zero_limit_empties_group() {
        let limited = limit_group(group(vec![item(0, 0, 1)]), 0);
        assert!(limited.matches.is_empty());
        assert!(limited.blob_lines.is_empty());
        assert_eq!(limited.end_line, 0);
    }

    #[test]
    fn test_context_is_clamped_to_group_end() {
        let limited = limit_group_with_context(group(vec![item(1, 0, 1), item(2, 0, 1)]), 1, 5);
        assert_eq!(limited.end_line, 3);
        assert_eq!(limited.blob_lines.len(), 3);
        assert_eq!(limited.matches.len(), 2);
    }

    #[test]
    fn test_without_trailing_context() {
        let limited = limit_group_with_context(group(vec![item(0, 0, 1), item(1, 0, 1)]), 1, 0);
        assert_eq!(limited.end_line, 1);
        assert_eq!(limited.blob_lines, vec!["line0"]);
        assert_eq!(limited.matches, vec![item(0, 0, 1)]);
    }

    #[test]
    fn test_group_not_starting_at_zero() {
        let original = MatchGroup {
            blob_lines: (10..15).map(|i| format!("line{}", i)).collect(),
            matches: vec![item(10, 0, 1), item(13, 0, 1)],
            position: Position {
                line: 10,
                character: 0,
            },
            start_line: 10,
            end_line: 15,
        };
        let limited = limit_group(original, 1);
        assert_eq!(limited.end_line, 12);
        assert_eq!(limited.blob_lines, vec!["line10", "line11"]);
        assert_eq!(limited.matches, vec![item(10, 0, 1)]);
    }

    #[test]
    fn test_huge_line_numbers_do_not_overflow() {
        let original = MatchGroup {
            blob_lines: vec!["a".into(), "b".into()],
            matches: vec![item(usize::MAX - 1, 0, 1), item(usize::MAX, 0, 1)],
            position: Position {
                line: usize::MAX - 1,
                character: 0,
            },
            start_line: usize::MAX - 1,
            end_line: usize::MAX,
        };
        let limited = limit_group_with_context(original, 1, usize::MAX);
        assert_eq!(limited.end_line, usize::MAX);
        assert_eq!(limited.blob_lines.len(), 1);
        assert_eq!(limited.matches, vec![item(usize::MAX - 1, 0, 1)]);
    }

    #[test]
    fn test_limit_with_config() {
        let config = SearchConfig::default().with_match_context_lines(0);
        let limited =
            limit_group_with_config(group(vec![item(0, 0, 1), item(2, 0, 1)]), 1, &config);
        assert_eq!(limited.end_line, 1);
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = serde_json::json!({
            "blobLines": ["a"],
            "matches": [{"line": 0, "character": 0, "highlightLength": 1, "isInContext": false}],
            "position": {"line": 0, "character": 0},
            "startLine": 0,
            "endLine": 1
        });
        let parsed: MatchGroup = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.matches[0].highlight_length, 1);
        assert_eq!(parsed.end_line, 1);
    }
}
