//! Recognized search filter fields.
//!
//! A filter is written `field:value` inside a query. The set of fields the
//! search backend understands is fixed; [`FilterType`] enumerates it and
//! resolves the short aliases users type (`r:` for `repo:`, `f:` for
//! `file:`, and so on).

use serde::{Deserialize, Serialize};

/// A recognized filter field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    After,
    Archived,
    Author,
    Before,
    Case,
    Committer,
    Content,
    Context,
    Count,
    File,
    Fork,
    Lang,
    Message,
    PatternType,
    Repo,
    RepoHasCommitAfter,
    RepoHasFile,
    Rev,
    Select,
    Timeout,
    Type,
    Visibility,
}

impl FilterType {
    /// Every recognized field, in canonical-name order.
    pub const ALL: [FilterType; 22] = [
        Self::After,
        Self::Archived,
        Self::Author,
        Self::Before,
        Self::Case,
        Self::Committer,
        Self::Content,
        Self::Context,
        Self::Count,
        Self::File,
        Self::Fork,
        Self::Lang,
        Self::Message,
        Self::PatternType,
        Self::Repo,
        Self::RepoHasCommitAfter,
        Self::RepoHasFile,
        Self::Rev,
        Self::Select,
        Self::Timeout,
        Self::Type,
        Self::Visibility,
    ];

    /// Canonical field name as written in queries.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::After => "after",
            Self::Archived => "archived",
            Self::Author => "author",
            Self::Before => "before",
            Self::Case => "case",
            Self::Committer => "committer",
            Self::Content => "content",
            Self::Context => "context",
            Self::Count => "count",
            Self::File => "file",
            Self::Fork => "fork",
            Self::Lang => "lang",
            Self::Message => "message",
            Self::PatternType => "patterntype",
            Self::Repo => "repo",
            Self::RepoHasCommitAfter => "repohascommitafter",
            Self::RepoHasFile => "repohasfile",
            Self::Rev => "rev",
            Self::Select => "select",
            Self::Timeout => "timeout",
            Self::Type => "type",
            Self::Visibility => "visibility",
        }
    }

    /// Alternative spellings accepted for this field.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::After => &["since"],
            Self::Before => &["until"],
            Self::File => &["f"],
            Self::Lang => &["l", "language"],
            Self::Message => &["m", "msg"],
            Self::Repo => &["r"],
            Self::Rev => &["revision"],
            _ => &[],
        }
    }

    /// Resolve a raw field name (canonical or alias, any case).
    ///
    /// Returns `None` for fields the backend does not know; callers treat
    /// those filters as opaque text.
    pub fn resolve(field: &str) -> Option<Self> {
        let lower = field.to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|ft| ft.as_str() == lower || ft.aliases().contains(&lower.as_str()))
    }
}

impl std::fmt::Display for FilterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FilterType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s).ok_or_else(|| format!("Unknown filter type: {}", s))
    }
}
