//! # Catalog Search
//!
//! This crate provides traits and implementations for interacting with the
//! search engine. It includes definitions for errors, interfaces, and a
//! concrete implementation for OpenSearch.
//!
//! The search index is a derived, eventually-consistent projection of the
//! record store. Writes arrive only through the synchronizer or the bulk
//! reindexer; reads serve the search, autocomplete, fuzzy and suggestion
//! endpoints.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;

pub use config::SearchConfig;
pub use errors::SearchError;
pub use interfaces::SearchIndexProvider;
pub use opensearch::OpenSearchIndex;
