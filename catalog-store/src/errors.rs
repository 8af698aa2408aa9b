//! Record store error types.

use thiserror::Error;

/// Errors that can occur during record store operations.
///
/// A store error is fatal to the request that triggered it: the catalog
/// service surfaces it as a server error and never attempts index
/// propagation for a mutation that did not commit.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to reach the database.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// A statement failed to execute.
    #[error("Query error: {0}")]
    QueryError(String),
}

impl StoreError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a query error.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryError(msg.into())
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(e) => StoreError::connection(e.to_string()),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                StoreError::connection(err.to_string())
            }
            other => StoreError::query(other.to_string()),
        }
    }
}
