//! Search index provider trait definition.
//!
//! This module defines the abstract interface for search index operations,
//! allowing for different backend implementations (OpenSearch,
//! Elasticsearch, in-memory mocks for tests).

use async_trait::async_trait;

use crate::errors::SearchError;
use catalog_shared::{ProductDocument, SearchFilter};

/// Abstracts the underlying search index implementation.
///
/// The synchronizer and bulk reindexer use the write side
/// (`index_document`, `delete_document`); the catalog service's search
/// endpoints use the query side. Implementations are injected as
/// `Arc<dyn SearchIndexProvider>` to enable testing with mocks.
///
/// All methods return `Result<T, SearchError>` for consistent error
/// handling across backends, and every implementation must bound each call
/// with a timeout.
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Upsert a product document under its product id.
    ///
    /// If a document with the same id already exists it is replaced;
    /// re-sending the same projection leaves the index unchanged apart from
    /// the `indexed_at` stamp.
    async fn index_document(&self, document: &ProductDocument) -> Result<(), SearchError>;

    /// Delete the document with the given product id.
    ///
    /// Deleting an absent document is a successful no-op.
    async fn delete_document(&self, product_id: i64) -> Result<(), SearchError>;

    /// Filtered search: optional brand, price range, and stock filters
    /// combined with logical AND. An empty filter matches all documents.
    async fn search(&self, filter: &SearchFilter) -> Result<Vec<ProductDocument>, SearchError>;

    /// Case-insensitive prefix match on the product name.
    async fn autocomplete(&self, prefix: &str) -> Result<Vec<ProductDocument>, SearchError>;

    /// Approximate text match on the product name, tolerating typos.
    async fn fuzzy_search(&self, text: &str) -> Result<Vec<ProductDocument>, SearchError>;

    /// Term-correction suggestions for a possibly misspelled query.
    async fn suggest(&self, text: &str) -> Result<Vec<String>, SearchError>;

    /// Prefix-completion suggestions with fuzzy tolerance.
    async fn suggest_complete(&self, prefix: &str) -> Result<Vec<String>, SearchError>;

    /// Create the index with its mappings if it does not exist.
    ///
    /// Non-destructive; called during application startup.
    async fn ensure_index_exists(&self) -> Result<(), SearchError>;

    /// Delete the index if present and recreate it with fresh mappings.
    ///
    /// Destructive: all documents are lost until the next reindex pass.
    /// Must only be invoked explicitly, never as a side effect.
    async fn recreate_index(&self) -> Result<(), SearchError>;

    /// Check if the search engine is healthy and reachable.
    async fn health_check(&self) -> Result<bool, SearchError>;
}
