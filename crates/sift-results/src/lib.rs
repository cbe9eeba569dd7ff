//! # sift-results
//!
//! Shaping of search results for display.
//!
//! Currently this covers truncating a file's match groups so that a result
//! shows at most a given number of matches, keeping the surrounding lines
//! that belong to those matches.

pub mod match_group;

// Re-export core types
pub use sift_core::{Error, Result, SearchConfig};

pub use match_group::{
    limit_group, limit_group_with_config, limit_group_with_context, MatchGroup, MatchItem,
    Position,
};
