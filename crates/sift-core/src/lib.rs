//! # sift-core
//!
//! Core types, errors, and configuration shared by the sift crates.
//!
//! This crate provides the error type, the structured logging field names,
//! the default constants, and the environment-driven [`SearchConfig`] that
//! the query, results, and insights crates build on.

pub mod config;
pub mod defaults;
pub mod error;
pub mod logging;

// Re-export commonly used types at crate root
pub use config::{PatternType, SearchConfig};
pub use error::{Error, Result};
