//! Search bar state and submission.
//!
//! [`SearchQueryState`] holds what the search input currently shows plus the
//! case-sensitivity toggle. Submitting applies a batch of [`QueryUpdate`]s to
//! the current query and hands back the parameters of the search to run,
//! without touching the stored input state.

use serde::{Deserialize, Serialize};
use sift_core::{PatternType, SearchConfig};
use tracing::{debug, info};

use crate::update::{update_query, QueryUpdate};

/// What caused the last change to the query input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum QueryChangeSource {
    /// Typed by the user.
    #[default]
    UserInput,
    /// Set programmatically by a form (e.g. a filter suggestion).
    SearchForm,
    /// Set by a search-type button in the sidebar.
    SearchTypes,
}

/// Contents of the search input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct QueryState {
    pub query: String,
    pub change_source: QueryChangeSource,
}

impl QueryState {
    /// State for a query typed by the user.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            change_source: QueryChangeSource::UserInput,
        }
    }

    /// Set the change source.
    pub fn with_change_source(mut self, source: QueryChangeSource) -> Self {
        self.change_source = source;
        self
    }
}

/// Where a search submission came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SubmitSource {
    Home,
    Nav,
    Filter,
    Sidebar,
    Scope,
}

/// Parameters supplied by the caller of [`SearchQueryState::submit_search`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitSearchParameters {
    pub source: SubmitSource,
    /// Whether the search should be recorded in recent searches.
    #[serde(default)]
    pub add_recent_search: bool,
}

impl SubmitSearchParameters {
    pub fn new(source: SubmitSource) -> Self {
        Self {
            source,
            add_recent_search: false,
        }
    }
}

/// A search ready to be executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedSearch {
    pub query: String,
    pub case_sensitive: bool,
    pub pattern_type: PatternType,
    pub source: SubmitSource,
    pub add_recent_search: bool,
}

impl SubmittedSearch {
    /// URL query string for the search results page.
    ///
    /// # Example
    /// ```
    /// use sift_core::PatternType;
    /// use sift_query::state::{SubmitSource, SubmittedSearch};
    ///
    /// let search = SubmittedSearch {
    ///     query: "repo:foo bar".to_string(),
    ///     case_sensitive: true,
    ///     pattern_type: PatternType::Literal,
    ///     source: SubmitSource::Nav,
    ///     add_recent_search: false,
    /// };
    /// assert_eq!(search.to_query_string(), "q=repo%3Afoo%20bar&patternType=literal&case=yes");
    /// ```
    pub fn to_query_string(&self) -> String {
        let mut params = format!(
            "q={}&patternType={}",
            urlencoding::encode(&self.query),
            self.pattern_type
        );
        if self.case_sensitive {
            params.push_str("&case=yes");
        }
        params
    }
}

/// Search input state shared by the search bar and the filter sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQueryState {
    query_state: QueryState,
    search_case_sensitivity: bool,
    pattern_type: PatternType,
}

impl Default for SearchQueryState {
    fn default() -> Self {
        Self::new(&SearchConfig::default())
    }
}

impl SearchQueryState {
    /// Empty state seeded from the search configuration.
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            query_state: QueryState::default(),
            search_case_sensitivity: config.case_sensitive,
            pattern_type: config.pattern_type,
        }
    }

    /// Current contents of the search input.
    pub fn query_state(&self) -> &QueryState {
        &self.query_state
    }

    /// Whether searches are submitted case-sensitively.
    pub fn search_case_sensitivity(&self) -> bool {
        self.search_case_sensitivity
    }

    /// Pattern type attached to submitted searches.
    pub fn pattern_type(&self) -> PatternType {
        self.pattern_type
    }

    /// Replace the input state.
    pub fn set_query_state(&mut self, query_state: QueryState) {
        self.query_state = query_state;
    }

    /// Compute the new input state from the current one.
    pub fn update_query_state(&mut self, update: impl FnOnce(&QueryState) -> QueryState) {
        self.query_state = update(&self.query_state);
    }

    pub fn set_search_case_sensitivity(&mut self, case_sensitive: bool) {
        self.search_case_sensitivity = case_sensitive;
    }

    /// Apply `updates` to the current query and return the search to run.
    ///
    /// Returns `None` when the resulting query is blank. The stored input
    /// state is not modified; callers that want the input to reflect the
    /// submitted query set it themselves.
    pub fn submit_search(
        &self,
        parameters: SubmitSearchParameters,
        updates: &[QueryUpdate],
    ) -> Option<SubmittedSearch> {
        let query = update_query(&self.query_state.query, updates);
        if query.trim().is_empty() {
            debug!(source = ?parameters.source, "Not submitting empty query");
            return None;
        }

        info!(
            query = %query,
            source = ?parameters.source,
            case_sensitive = self.search_case_sensitivity,
            "Submitting search"
        );
        Some(SubmittedSearch {
            query,
            case_sensitive: self.search_case_sensitivity,
            pattern_type: self.pattern_type,
            source: parameters.source,
            add_recent_search: parameters.add_recent_search,
        })
    }
}
