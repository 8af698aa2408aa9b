//! Bulk reindexer: full rebuild of the search index from the record store.
//!
//! Used to recover from propagation failures and to reload data after an
//! index-schema change. A pass is idempotent (every write is an upsert) and
//! safe to run concurrently with live traffic; a live delete racing a
//! reindex upsert can transiently resurrect a document, which the next pass
//! corrects.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::errors::SyncError;
use crate::synchronizer::Synchronizer;
use catalog_search::SearchIndexProvider;
use catalog_store::RecordStore;

/// Outcome of a reindex pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReindexSummary {
    /// Number of products scanned from the record store.
    pub total: usize,
    /// Number of products whose projection reached the index.
    pub synced: usize,
    /// Ids whose propagation failed even after the synchronizer's retry.
    pub failed_ids: Vec<i64>,
}

impl ReindexSummary {
    /// Whether every scanned product reached the index.
    pub fn is_converged(&self) -> bool {
        self.failed_ids.is_empty()
    }
}

/// Rebuilds the search index from the record store.
pub struct Reindexer {
    store: Arc<dyn RecordStore>,
    search: Arc<dyn SearchIndexProvider>,
    synchronizer: Synchronizer,
}

impl Reindexer {
    /// Create a reindexer over the given stores.
    pub fn new(store: Arc<dyn RecordStore>, search: Arc<dyn SearchIndexProvider>) -> Self {
        let synchronizer = Synchronizer::new(search.clone());
        Self {
            store,
            search,
            synchronizer,
        }
    }

    /// Upsert a projection for every product in the record store.
    ///
    /// Does not remove index documents whose id no longer exists in the
    /// store; use [`Reindexer::run_destructive`] for a clean rebuild.
    /// Per-product failures are collected in the summary, not fatal to the
    /// pass; a record store scan failure is.
    #[instrument(skip(self))]
    pub async fn run(&self) -> Result<ReindexSummary, SyncError> {
        let products = self.store.all().await?;
        let total = products.len();

        info!(total = total, "Starting reindex pass");

        let mut synced = 0;
        let mut failed_ids = Vec::new();

        for product in &products {
            let outcome = self.synchronizer.propagate_upsert(product).await;
            if outcome.is_stale() {
                warn!(product_id = product.id, "Reindex upsert failed");
                failed_ids.push(product.id);
            } else {
                synced += 1;
            }
        }

        info!(
            total = total,
            synced = synced,
            failed = failed_ids.len(),
            "Reindex pass complete"
        );

        Ok(ReindexSummary {
            total,
            synced,
            failed_ids,
        })
    }

    /// Drop the index, recreate it with fresh mappings, and run a full pass.
    ///
    /// Destructive and therefore never invoked implicitly: documents whose
    /// id no longer exists in the record store are removed along with
    /// everything else, and the index is empty until the pass fills it.
    #[instrument(skip(self))]
    pub async fn run_destructive(&self) -> Result<ReindexSummary, SyncError> {
        info!("Recreating search index before reindex");
        self.search.recreate_index().await?;
        self.run().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use catalog_search::SearchError;
    use catalog_shared::{ProductDocument, ProductInput, SearchFilter};
    use catalog_store::MemoryStore;

    /// Mock index that can reject writes for specific product ids.
    struct MockSearchIndex {
        documents: Mutex<HashMap<i64, ProductDocument>>,
        reject_ids: Vec<i64>,
        recreate_calls: AtomicUsize,
    }

    impl MockSearchIndex {
        fn new() -> Self {
            Self {
                documents: Mutex::new(HashMap::new()),
                reject_ids: Vec::new(),
                recreate_calls: AtomicUsize::new(0),
            }
        }

        fn rejecting(ids: Vec<i64>) -> Self {
            Self {
                reject_ids: ids,
                ..Self::new()
            }
        }

        fn len(&self) -> usize {
            self.documents.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl SearchIndexProvider for MockSearchIndex {
        async fn index_document(&self, document: &ProductDocument) -> Result<(), SearchError> {
            if self.reject_ids.contains(&document.id) {
                return Err(SearchError::index("injected failure"));
            }
            self.documents
                .lock()
                .unwrap()
                .insert(document.id, document.clone());
            Ok(())
        }

        async fn delete_document(&self, product_id: i64) -> Result<(), SearchError> {
            self.documents.lock().unwrap().remove(&product_id);
            Ok(())
        }

        async fn search(&self, _: &SearchFilter) -> Result<Vec<ProductDocument>, SearchError> {
            Ok(self.documents.lock().unwrap().values().cloned().collect())
        }

        async fn autocomplete(&self, _: &str) -> Result<Vec<ProductDocument>, SearchError> {
            Ok(vec![])
        }

        async fn fuzzy_search(&self, _: &str) -> Result<Vec<ProductDocument>, SearchError> {
            Ok(vec![])
        }

        async fn suggest(&self, _: &str) -> Result<Vec<String>, SearchError> {
            Ok(vec![])
        }

        async fn suggest_complete(&self, _: &str) -> Result<Vec<String>, SearchError> {
            Ok(vec![])
        }

        async fn ensure_index_exists(&self) -> Result<(), SearchError> {
            Ok(())
        }

        async fn recreate_index(&self) -> Result<(), SearchError> {
            self.recreate_calls.fetch_add(1, Ordering::SeqCst);
            self.documents.lock().unwrap().clear();
            Ok(())
        }

        async fn health_check(&self) -> Result<bool, SearchError> {
            Ok(true)
        }
    }

    fn input(name: &str) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            brand: "Acme".to_string(),
            price: 5.0,
            in_stock: true,
        }
    }

    #[tokio::test]
    async fn test_reindex_converges_missing_documents() {
        let store = Arc::new(MemoryStore::new());
        let index = Arc::new(MockSearchIndex::new());

        // Store has products the index lacks (simulated lost propagation)
        for name in ["A", "B", "C"] {
            store.create(input(name)).await.unwrap();
        }
        assert_eq!(index.len(), 0);

        let reindexer = Reindexer::new(store.clone(), index.clone());
        let summary = reindexer.run().await.unwrap();

        assert_eq!(summary.total, 3);
        assert_eq!(summary.synced, 3);
        assert!(summary.is_converged());
        assert_eq!(index.len(), 3);
    }

    #[tokio::test]
    async fn test_reindex_is_idempotent() {
        let store = Arc::new(MemoryStore::new());
        let index = Arc::new(MockSearchIndex::new());
        store.create(input("A")).await.unwrap();

        let reindexer = Reindexer::new(store.clone(), index.clone());
        reindexer.run().await.unwrap();
        let summary = reindexer.run().await.unwrap();

        assert_eq!(summary.synced, 1);
        assert_eq!(index.len(), 1);
    }

    #[tokio::test]
    async fn test_reindex_collects_per_product_failures() {
        let store = Arc::new(MemoryStore::new());
        let first = store.create(input("A")).await.unwrap();
        store.create(input("B")).await.unwrap();

        let index = Arc::new(MockSearchIndex::rejecting(vec![first.id]));
        let reindexer = Reindexer::new(store.clone(), index.clone());

        let summary = reindexer.run().await.unwrap();

        assert_eq!(summary.total, 2);
        assert_eq!(summary.synced, 1);
        assert_eq!(summary.failed_ids, vec![first.id]);
        assert!(!summary.is_converged());
    }

    #[tokio::test]
    async fn test_run_does_not_touch_orphaned_documents() {
        let store = Arc::new(MemoryStore::new());
        let index = Arc::new(MockSearchIndex::new());

        // Orphan: indexed document whose id is absent from the store
        let orphan = input("Orphan").into_product(99);
        index
            .index_document(&ProductDocument::project(&orphan))
            .await
            .unwrap();

        store.create(input("Live")).await.unwrap();

        let reindexer = Reindexer::new(store.clone(), index.clone());
        reindexer.run().await.unwrap();

        // Non-destructive pass leaves the orphan in place
        assert_eq!(index.len(), 2);
    }

    #[tokio::test]
    async fn test_destructive_rebuild_drops_orphans() {
        let store = Arc::new(MemoryStore::new());
        let index = Arc::new(MockSearchIndex::new());

        let orphan = input("Orphan").into_product(99);
        index
            .index_document(&ProductDocument::project(&orphan))
            .await
            .unwrap();

        store.create(input("Live")).await.unwrap();

        let reindexer = Reindexer::new(store.clone(), index.clone());
        let summary = reindexer.run_destructive().await.unwrap();

        assert_eq!(index.recreate_calls.load(Ordering::SeqCst), 1);
        assert_eq!(summary.synced, 1);
        assert_eq!(index.len(), 1);
    }
}
