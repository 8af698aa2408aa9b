//! Search error types.
//!
//! This module defines the error types that can occur during search engine
//! operations.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur during search engine operations.
///
/// For mutating calls these surface as propagation failures, which are
/// non-fatal to the enclosing request; for query calls they surface as a
/// service-unavailable condition, never as a silently empty result set.
#[derive(Error, Debug, Clone)]
pub enum SearchError {
    /// Failed to establish connection to the search engine.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Search query execution failed.
    #[error("Query error: {0}")]
    QueryError(String),

    /// Failed to index a document.
    #[error("Index error: {0}")]
    IndexError(String),

    /// Failed to delete a document.
    #[error("Delete error: {0}")]
    DeleteError(String),

    /// Failed to create or delete the search index itself.
    #[error("Index management error: {0}")]
    IndexManagementError(String),

    /// Failed to parse a response from the search engine.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The call exceeded its bounded timeout.
    #[error("Timed out after {0:?}")]
    Timeout(Duration),
}

impl SearchError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a query error.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryError(msg.into())
    }

    /// Create an index error.
    pub fn index(msg: impl Into<String>) -> Self {
        Self::IndexError(msg.into())
    }

    /// Create a delete error.
    pub fn delete(msg: impl Into<String>) -> Self {
        Self::DeleteError(msg.into())
    }

    /// Create an index management error.
    pub fn index_management(msg: impl Into<String>) -> Self {
        Self::IndexManagementError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }
}
