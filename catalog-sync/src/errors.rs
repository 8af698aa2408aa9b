//! Synchronization error types.

use thiserror::Error;

use catalog_search::SearchError;
use catalog_store::StoreError;

/// Errors that abort a reindex pass.
///
/// Per-document index failures do not abort a pass (they are collected in
/// the summary); these errors cover the record store scan and explicit
/// index management, which have nothing to fall back to.
#[derive(Error, Debug)]
pub enum SyncError {
    /// The record store scan failed.
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),

    /// Index management (drop/create) failed.
    #[error("Search error: {0}")]
    SearchError(#[from] SearchError),
}
