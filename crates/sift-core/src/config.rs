//! Runtime configuration for search submission and result shaping.
//!
//! Values come from environment variables with the defaults in
//! [`crate::defaults`]. Unparseable values are ignored with a warning so a
//! typo in the environment never prevents a search from being submitted.

use std::env;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::defaults;

/// How the pattern part of a query is interpreted by the search backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PatternType {
    /// Literal text with regexp enabled inside `/.../`.
    #[default]
    Standard,
    /// Exact text.
    Literal,
    /// Regular expression.
    Regexp,
    /// Structural (comby-style) pattern.
    Structural,
}

impl PatternType {
    /// Canonical lowercase name, as sent in the `patternType` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Literal => "literal",
            Self::Regexp => "regexp",
            Self::Structural => "structural",
        }
    }
}

impl std::fmt::Display for PatternType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PatternType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "literal" => Ok(Self::Literal),
            "regexp" | "regex" => Ok(Self::Regexp),
            "structural" => Ok(Self::Structural),
            _ => Err(format!("Invalid pattern type: {}", s)),
        }
    }
}

/// Search defaults applied when a query is submitted.
///
/// # Example
/// ```
/// use sift_core::{PatternType, SearchConfig};
///
/// let config = SearchConfig::default();
/// assert_eq!(config.pattern_type, PatternType::Standard);
/// assert!(!config.case_sensitive);
/// assert_eq!(config.match_context_lines, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Pattern type sent with every submitted search.
    pub pattern_type: PatternType,

    /// Initial case sensitivity of a new search query state.
    pub case_sensitive: bool,

    /// Lines of trailing context kept when truncating match groups.
    pub match_context_lines: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            pattern_type: PatternType::default(),
            case_sensitive: defaults::CASE_SENSITIVE,
            match_context_lines: defaults::MATCH_CONTEXT_LINES,
        }
    }
}

impl SearchConfig {
    /// Constructs the configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SIFT_PATTERN_TYPE` (default: standard)
    /// - `SIFT_CASE_SENSITIVE` (default: false)
    /// - `SIFT_MATCH_CONTEXT_LINES` (default: 1)
    ///
    /// Booleans accept "true", "1", "yes", "on" and "false", "0", "no", "off"
    /// (case-insensitive).
    pub fn from_env() -> Self {
        let pattern_type = match env::var(defaults::ENV_PATTERN_TYPE) {
            Ok(raw) => raw.parse::<PatternType>().unwrap_or_else(|e: String| {
                warn!(error = %e, "Ignoring {}", defaults::ENV_PATTERN_TYPE);
                PatternType::default()
            }),
            Err(_) => PatternType::default(),
        };

        Self {
            pattern_type,
            case_sensitive: parse_bool_env(defaults::ENV_CASE_SENSITIVE, defaults::CASE_SENSITIVE),
            match_context_lines: parse_usize_env(
                defaults::ENV_MATCH_CONTEXT_LINES,
                defaults::MATCH_CONTEXT_LINES,
            ),
        }
    }

    /// Override the pattern type.
    pub fn with_pattern_type(mut self, pattern_type: PatternType) -> Self {
        self.pattern_type = pattern_type;
        self
    }

    /// Override the initial case sensitivity.
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Override the trailing context kept by match group truncation.
    pub fn with_match_context_lines(mut self, lines: usize) -> Self {
        self.match_context_lines = lines;
        self
    }
}

/// Parses a boolean environment variable with a default fallback.
fn parse_bool_env(key: &str, default: bool) -> bool {
    let Ok(raw) = env::var(key) else {
        return default;
    };
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => true,
        "false" | "0" | "no" | "off" => false,
        _ => {
            warn!(value = %raw, "Ignoring {}", key);
            default
        }
    }
}

/// Parses an unsigned integer environment variable with a default fallback.
fn parse_usize_env(key: &str, default: usize) -> usize {
    let Ok(raw) = env::var(key) else {
        return default;
    };
    raw.trim().parse().unwrap_or_else(|_| {
        warn!(value = %raw, "Ignoring {}", key);
        default
    })
}
