//! Search query scanner.
//!
//! Splits a query string into tokens while keeping the byte range of every
//! token, so callers can rewrite a single filter value and leave every other
//! byte of the query untouched.
//!
//! # Syntax
//!
//! - Tokens are separated by whitespace.
//! - `"..."` and `'...'` quote a section (backslash escapes the next
//!   character). A quote only opens at the start of a token, after `(`, or
//!   directly after a filter's `:`; elsewhere quote characters are literal.
//! - `-?field:value` is a filter, `and`/`or`/`not` are keywords, leading `(`
//!   and unmatched trailing `)` are parentheses, anything else is a pattern.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use tracing::trace;

use crate::filters::FilterType;

static FILTER_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(-?)([A-Za-z][A-Za-z0-9_]*):").expect("valid filter prefix regex")
});

/// Errors produced while scanning a query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// A quoted section was opened but never closed.
    #[error("unterminated quote at byte {offset}")]
    UnterminatedQuote { offset: usize },
}

impl From<ScanError> for sift_core::Error {
    fn from(e: ScanError) -> Self {
        sift_core::Error::Scan(e.to_string())
    }
}

/// Boolean keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Keyword {
    And,
    Or,
    Not,
}

/// A `field:value` filter token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterToken {
    /// Field name as written (alias and case preserved).
    pub field: String,
    /// Byte range of the field name.
    pub field_range: Range<usize>,
    /// Value with quotes and escapes removed.
    pub value: String,
    /// Byte range of the raw value (quotes included). Empty for `field:`.
    pub value_range: Range<usize>,
    /// Whether the filter was written `-field:value`.
    pub negated: bool,
    /// Whether the value was quoted.
    pub quoted: bool,
}

impl FilterToken {
    /// Recognized field this filter refers to, if any.
    pub fn filter_type(&self) -> Option<FilterType> {
        FilterType::resolve(&self.field)
    }
}

/// Token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TokenKind {
    Filter(FilterToken),
    Pattern { value: String, quoted: bool },
    Keyword { keyword: Keyword },
    OpenParen,
    CloseParen,
}

/// A scanned token and its byte range in the source query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    #[serde(flatten)]
    pub kind: TokenKind,
    pub range: Range<usize>,
}

impl Token {
    /// The filter payload, when this token is a filter.
    pub fn as_filter(&self) -> Option<&FilterToken> {
        match &self.kind {
            TokenKind::Filter(filter) => Some(filter),
            _ => None,
        }
    }

    /// Source text of this token.
    pub fn text<'a>(&self, query: &'a str) -> &'a str {
        &query[self.range.clone()]
    }
}

/// Scan a query into tokens.
///
/// # Example
/// ```
/// use sift_query::scanner::{scan_search_query, TokenKind};
///
/// let tokens = scan_search_query("repo:foo bar").unwrap();
/// assert_eq!(tokens.len(), 2);
/// assert!(matches!(tokens[0].kind, TokenKind::Filter(_)));
/// assert_eq!(tokens[1].text("repo:foo bar"), "bar");
/// ```
pub fn scan_search_query(query: &str) -> Result<Vec<Token>, ScanError> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while let Some(c) = query[pos..].chars().next() {
        if c.is_whitespace() {
            pos += c.len_utf8();
            continue;
        }
        let end = scan_run(query, pos)?;
        push_run_tokens(query, pos..end, &mut tokens);
        pos = end;
    }

    trace!(token_count = tokens.len(), "Scanned query");
    Ok(tokens)
}

/// Find the end of the whitespace-delimited run starting at `start`.
fn scan_run(query: &str, start: usize) -> Result<usize, ScanError> {
    let mut chars = query[start..].char_indices();
    let mut prev: Option<char> = None;

    while let Some((offset, c)) = chars.next() {
        if c.is_whitespace() {
            return Ok(start + offset);
        }
        let opens_quote =
            (c == '"' || c == '\'') && matches!(prev, None | Some('(') | Some(':'));
        if opens_quote {
            let mut closed = false;
            while let Some((_, inner)) = chars.next() {
                if inner == '\\' {
                    chars.next();
                } else if inner == c {
                    closed = true;
                    break;
                }
            }
            if !closed {
                return Err(ScanError::UnterminatedQuote {
                    offset: start + offset,
                });
            }
        }
        prev = Some(c);
    }

    Ok(query.len())
}

/// Classify one run into parenthesis, keyword, filter, and pattern tokens.
fn push_run_tokens(query: &str, run: Range<usize>, tokens: &mut Vec<Token>) {
    let mut start = run.start;
    let mut end = run.end;

    while start < end && query.as_bytes()[start] == b'(' {
        tokens.push(Token {
            kind: TokenKind::OpenParen,
            range: start..start + 1,
        });
        start += 1;
    }

    let mut closing = 0;
    while start < end && query.as_bytes()[end - 1] == b')' {
        let body = &query[start..end];
        if body.matches('(').count() >= body.matches(')').count() {
            break;
        }
        end -= 1;
        closing += 1;
    }

    if start < end {
        tokens.push(classify(query, start..end));
    }

    for i in 0..closing {
        tokens.push(Token {
            kind: TokenKind::CloseParen,
            range: end + i..end + i + 1,
        });
    }
}

fn classify(query: &str, range: Range<usize>) -> Token {
    let body = &query[range.clone()];

    let keyword = match body.to_ascii_lowercase().as_str() {
        "and" => Some(Keyword::And),
        "or" => Some(Keyword::Or),
        "not" => Some(Keyword::Not),
        _ => None,
    };
    if let Some(keyword) = keyword {
        return Token {
            kind: TokenKind::Keyword { keyword },
            range,
        };
    }

    if let Some(caps) = FILTER_PREFIX.captures(body) {
        let negated = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
        let field = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
        let field_start = range.start + usize::from(negated);
        let value_start = field_start + field.len() + 1;
        let raw_value = &query[value_start..range.end];
        let (value, quoted) = unquote(raw_value);
        return Token {
            kind: TokenKind::Filter(FilterToken {
                field: field.to_string(),
                field_range: field_start..field_start + field.len(),
                value,
                value_range: value_start..range.end,
                negated,
                quoted,
            }),
            range,
        };
    }

    let (value, quoted) = unquote(body);
    Token {
        kind: TokenKind::Pattern { value, quoted },
        range,
    }
}

/// Strip surrounding quotes and escapes. Returns the text unchanged when it
/// is not a single quoted section.
fn unquote(raw: &str) -> (String, bool) {
    let mut chars = raw.chars();
    let Some(quote @ ('"' | '\'')) = chars.next() else {
        return (raw.to_string(), false);
    };

    let mut value = String::with_capacity(raw.len());
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                value.push(escaped);
            }
        } else if c == quote {
            // Trailing text after the closing quote means this was not a
            // quoted value after all.
            if chars.as_str().is_empty() {
                return (value, true);
            }
            break;
        } else {
            value.push(c);
        }
    }

    (raw.to_string(), false)
}
