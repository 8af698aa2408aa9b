//! Catalog service orchestration.
//!
//! Every mutating request follows the same pipeline:
//! validate, commit to the record store, propagate to the search index,
//! respond. The record store commit and the index propagation are two
//! sequential network calls, not one atomic transaction; there is no
//! two-phase commit and none is attempted. A failed propagation leaves the
//! committed mutation standing and is reported through the `index_stale`
//! flag on the result.

use std::sync::Arc;

use thiserror::Error;
use tracing::instrument;

use catalog_search::{SearchError, SearchIndexProvider};
use catalog_shared::{Product, ProductDocument, ProductInput, SearchFilter, ValidationError};
use catalog_store::{RecordStore, StoreError};
use catalog_sync::Synchronizer;

/// Errors surfaced by catalog service operations.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Client input failed validation; no store write occurred.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A search endpoint was called with an empty query string.
    #[error("query text must not be empty")]
    EmptyQuery,

    /// No product exists with the given id; no propagation was attempted.
    #[error("Product {0} not found")]
    NotFound(i64),

    /// The record store failed; fatal to the request.
    #[error("Record store failure: {0}")]
    Store(#[from] StoreError),

    /// A search index query failed or timed out. Surfaced as
    /// service-unavailable, never as a silently empty result set.
    #[error("Search index unavailable: {0}")]
    SearchUnavailable(#[from] SearchError),
}

/// Result of a mutating operation.
#[derive(Debug, Clone)]
pub struct MutationResult {
    /// The committed product state (prior state for deletes).
    pub product: Product,
    /// True when index propagation failed and the search index lags the
    /// record store until the next reindex pass.
    pub index_stale: bool,
}

/// Orchestrates catalog operations across the record store and the search
/// index.
///
/// Read paths (`get_product`, `list_products`) query the record store only.
/// Search paths query the search index only: they are read-only views of a
/// possibly-stale projection and offer no read-your-writes guarantee.
pub struct CatalogService {
    store: Arc<dyn RecordStore>,
    search: Arc<dyn SearchIndexProvider>,
    synchronizer: Synchronizer,
}

impl CatalogService {
    /// Create a service over the given stores.
    pub fn new(store: Arc<dyn RecordStore>, search: Arc<dyn SearchIndexProvider>) -> Self {
        let synchronizer = Synchronizer::new(search.clone());
        Self {
            store,
            search,
            synchronizer,
        }
    }

    /// Create a product and propagate its projection to the search index.
    #[instrument(skip(self, input))]
    pub async fn create_product(&self, input: ProductInput) -> Result<MutationResult, ServiceError> {
        input.validate()?;
        let product = self.store.create(input).await?;
        let outcome = self.synchronizer.propagate_upsert(&product).await;
        Ok(MutationResult {
            product,
            index_stale: outcome.is_stale(),
        })
    }

    /// Fetch a product from the record store.
    pub async fn get_product(&self, id: i64) -> Result<Product, ServiceError> {
        self.store
            .get(id)
            .await?
            .ok_or(ServiceError::NotFound(id))
    }

    /// List products from the record store, ordered by id.
    pub async fn list_products(&self, skip: i64, limit: i64) -> Result<Vec<Product>, ServiceError> {
        Ok(self.store.list(skip, limit).await?)
    }

    /// Fully replace a product and propagate the new projection.
    #[instrument(skip(self, input))]
    pub async fn update_product(
        &self,
        id: i64,
        input: ProductInput,
    ) -> Result<MutationResult, ServiceError> {
        input.validate()?;
        let product = self
            .store
            .update(id, input)
            .await?
            .ok_or(ServiceError::NotFound(id))?;
        let outcome = self.synchronizer.propagate_upsert(&product).await;
        Ok(MutationResult {
            product,
            index_stale: outcome.is_stale(),
        })
    }

    /// Delete a product and propagate the removal.
    ///
    /// Returns the deleted product's prior state.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i64) -> Result<MutationResult, ServiceError> {
        let product = self
            .store
            .delete(id)
            .await?
            .ok_or(ServiceError::NotFound(id))?;
        let outcome = self.synchronizer.propagate_delete(id).await;
        Ok(MutationResult {
            product,
            index_stale: outcome.is_stale(),
        })
    }

    /// Filtered search against the search index.
    pub async fn search(&self, filter: &SearchFilter) -> Result<Vec<ProductDocument>, ServiceError> {
        Ok(self.search.search(filter).await?)
    }

    /// Case-insensitive prefix match on product names.
    pub async fn autocomplete(&self, q: &str) -> Result<Vec<ProductDocument>, ServiceError> {
        Self::require_query(q)?;
        Ok(self.search.autocomplete(q).await?)
    }

    /// Typo-tolerant text match on product names.
    pub async fn fuzzy_search(&self, q: &str) -> Result<Vec<ProductDocument>, ServiceError> {
        Self::require_query(q)?;
        Ok(self.search.fuzzy_search(q).await?)
    }

    /// Term-correction suggestions.
    pub async fn suggest(&self, q: &str) -> Result<Vec<String>, ServiceError> {
        Self::require_query(q)?;
        Ok(self.search.suggest(q).await?)
    }

    /// Prefix-completion suggestions with fuzzy tolerance.
    pub async fn suggest_complete(&self, q: &str) -> Result<Vec<String>, ServiceError> {
        Self::require_query(q)?;
        Ok(self.search.suggest_complete(q).await?)
    }

    fn require_query(q: &str) -> Result<(), ServiceError> {
        if q.is_empty() {
            return Err(ServiceError::EmptyQuery);
        }
        Ok(())
    }
}
