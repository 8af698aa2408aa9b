//! Error types for search index operations.

mod search_error;

pub use search_error::SearchError;
