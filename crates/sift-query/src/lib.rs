//! # sift-query
//!
//! Scanning and rewriting of `field:value` search queries.
//!
//! This crate provides:
//! - A scanner that tokenizes queries while keeping byte ranges
//! - Filter primitives (`filter_exists`, `append_filter`, `update_filter`,
//!   `toggle_subquery`) that rewrite only the bytes they concern
//! - [`update_query`], which applies an ordered list of [`QueryUpdate`]s
//! - [`SearchQueryState`], the search bar state used to submit searches
//!
//! ## Example
//!
//! ```
//! use sift_query::{update_query, FilterType, QueryUpdate};
//!
//! let query = update_query(
//!     "repo:foo lang:ts",
//!     &[
//!         QueryUpdate::update_or_append(FilterType::Lang, "go"),
//!         QueryUpdate::toggle("case:yes"),
//!     ],
//! );
//! assert_eq!(query, "repo:foo lang:go case:yes");
//! ```

pub mod filters;
pub mod scanner;
pub mod state;
pub mod transformer;
pub mod update;
pub mod validate;

// Re-export core types
pub use sift_core::{Error, PatternType, Result, SearchConfig};

pub use filters::FilterType;
pub use scanner::{scan_search_query, FilterToken, Keyword, ScanError, Token, TokenKind};
pub use state::{
    QueryChangeSource, QueryState, SearchQueryState, SubmitSearchParameters, SubmitSource,
    SubmittedSearch,
};
pub use transformer::{append_filter, format_filter_value, toggle_subquery, update_filter};
pub use update::{update_query, QueryUpdate};
pub use validate::{filter_exists, find_filters};
