//! Synchronizer for propagating record store mutations to the search index.
//!
//! The record store commit is the point of truth. Propagation happens after
//! the commit and is never allowed to roll it back: a failed index write
//! leaves the system in a transient inconsistent state that the bulk
//! reindexer can repair, and the caller is told about it through
//! [`SyncOutcome::IndexStale`] rather than a hard error.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use catalog_search::{SearchError, SearchIndexProvider};
use catalog_shared::{Product, ProductDocument};

/// Outcome of a propagation attempt.
///
/// `IndexStale` is a warning-level outcome, not a failure: the record store
/// mutation stands and the request should report success with a staleness
/// flag.
#[derive(Debug)]
pub enum SyncOutcome {
    /// The index reflects the mutation.
    Applied,
    /// Propagation failed after the retry; the index lags the store until
    /// the next reindex pass.
    IndexStale {
        /// The error from the final attempt.
        error: SearchError,
    },
}

impl SyncOutcome {
    /// Whether the index is known to lag the record store.
    pub fn is_stale(&self) -> bool {
        matches!(self, SyncOutcome::IndexStale { .. })
    }
}

/// Propagates committed mutations to the search index.
///
/// Within one request, calls are issued sequentially after the record store
/// commit, so index operations for a given product id follow commit order.
/// No cross-id ordering is promised.
#[derive(Clone)]
pub struct Synchronizer {
    search: Arc<dyn SearchIndexProvider>,
}

impl Synchronizer {
    /// Create a synchronizer writing to the given search index.
    pub fn new(search: Arc<dyn SearchIndexProvider>) -> Self {
        Self { search }
    }

    /// Propagate a committed create or update.
    ///
    /// Builds the projection (including the `name_suggest` completion
    /// payload) and upserts it under the product id. Idempotent: repeating
    /// the call with the same product leaves the index document unchanged.
    ///
    /// Performs at most one immediate retry; the request path must never
    /// block unboundedly on the search engine.
    #[instrument(skip(self, product), fields(product_id = product.id))]
    pub async fn propagate_upsert(&self, product: &Product) -> SyncOutcome {
        let document = ProductDocument::project(product);

        match self.search.index_document(&document).await {
            Ok(()) => {
                debug!("Propagated upsert to search index");
                SyncOutcome::Applied
            }
            Err(first) => {
                warn!(error = %first, "Upsert propagation failed, retrying once");
                match self.search.index_document(&document).await {
                    Ok(()) => {
                        debug!("Upsert propagation succeeded on retry");
                        SyncOutcome::Applied
                    }
                    Err(error) => {
                        warn!(
                            product_id = product.id,
                            operation = "upsert",
                            error = %error,
                            "Propagation failed after retry; index is stale until next reindex"
                        );
                        SyncOutcome::IndexStale { error }
                    }
                }
            }
        }
    }

    /// Propagate a committed delete.
    ///
    /// Removing a document that was never indexed is a successful no-op;
    /// the provider treats an absent document as deleted.
    #[instrument(skip(self))]
    pub async fn propagate_delete(&self, product_id: i64) -> SyncOutcome {
        match self.search.delete_document(product_id).await {
            Ok(()) => {
                debug!(product_id = product_id, "Propagated delete to search index");
                SyncOutcome::Applied
            }
            Err(first) => {
                warn!(error = %first, "Delete propagation failed, retrying once");
                match self.search.delete_document(product_id).await {
                    Ok(()) => SyncOutcome::Applied,
                    Err(error) => {
                        warn!(
                            product_id = product_id,
                            operation = "delete",
                            error = %error,
                            "Propagation failed after retry; index is stale until next reindex"
                        );
                        SyncOutcome::IndexStale { error }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use catalog_shared::SearchFilter;

    /// Mock search index that fails a configurable number of times before
    /// succeeding, and records indexed documents for inspection.
    struct MockSearchIndex {
        fail_first: AtomicUsize,
        index_calls: AtomicUsize,
        delete_calls: AtomicUsize,
        documents: Mutex<HashMap<i64, ProductDocument>>,
    }

    impl MockSearchIndex {
        fn new(fail_first: usize) -> Self {
            Self {
                fail_first: AtomicUsize::new(fail_first),
                index_calls: AtomicUsize::new(0),
                delete_calls: AtomicUsize::new(0),
                documents: Mutex::new(HashMap::new()),
            }
        }

        fn take_failure(&self) -> bool {
            self.fail_first
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
        }
    }

    #[async_trait]
    impl SearchIndexProvider for MockSearchIndex {
        async fn index_document(&self, document: &ProductDocument) -> Result<(), SearchError> {
            self.index_calls.fetch_add(1, Ordering::SeqCst);
            if self.take_failure() {
                return Err(SearchError::index("injected failure"));
            }
            self.documents
                .lock()
                .unwrap()
                .insert(document.id, document.clone());
            Ok(())
        }

        async fn delete_document(&self, product_id: i64) -> Result<(), SearchError> {
            self.delete_calls.fetch_add(1, Ordering::SeqCst);
            if self.take_failure() {
                return Err(SearchError::delete("injected failure"));
            }
            // Absent documents are a no-op by contract
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
            self.documents.lock().unwrap().clear();
            Ok(())
        }

        async fn health_check(&self) -> Result<bool, SearchError> {
            Ok(true)
        }
    }

    fn product(id: i64, name: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            brand: "Acme".to_string(),
            price: 10.0,
            in_stock: true,
        }
    }

    #[tokio::test]
    async fn test_upsert_applied_on_first_attempt() {
        let index = Arc::new(MockSearchIndex::new(0));
        let sync = Synchronizer::new(index.clone());

        let outcome = sync.propagate_upsert(&product(1, "Widget")).await;

        assert!(!outcome.is_stale());
        assert_eq!(index.index_calls.load(Ordering::SeqCst), 1);
        assert!(index.documents.lock().unwrap().contains_key(&1));
    }

    #[tokio::test]
    async fn test_upsert_recovers_with_single_retry() {
        let index = Arc::new(MockSearchIndex::new(1));
        let sync = Synchronizer::new(index.clone());

        let outcome = sync.propagate_upsert(&product(1, "Widget")).await;

        assert!(!outcome.is_stale());
        assert_eq!(index.index_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_upsert_reports_stale_after_two_failures() {
        let index = Arc::new(MockSearchIndex::new(2));
        let sync = Synchronizer::new(index.clone());

        let outcome = sync.propagate_upsert(&product(1, "Widget")).await;

        assert!(outcome.is_stale());
        // Exactly one retry, never more
        assert_eq!(index.index_calls.load(Ordering::SeqCst), 2);
        assert!(index.documents.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upsert_is_idempotent() {
        let index = Arc::new(MockSearchIndex::new(0));
        let sync = Synchronizer::new(index.clone());
        let p = product(1, "Widget");

        sync.propagate_upsert(&p).await;
        sync.propagate_upsert(&p).await;

        let documents = index.documents.lock().unwrap();
        assert_eq!(documents.len(), 1);
        assert!(documents.get(&1).unwrap().matches(&p));
    }

    #[tokio::test]
    async fn test_upsert_replaces_previous_document() {
        let index = Arc::new(MockSearchIndex::new(0));
        let sync = Synchronizer::new(index.clone());

        sync.propagate_upsert(&product(1, "Old")).await;
        sync.propagate_upsert(&product(1, "New")).await;

        let documents = index.documents.lock().unwrap();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents.get(&1).unwrap().name, "New");
    }

    #[tokio::test]
    async fn test_delete_of_unindexed_id_is_noop() {
        let index = Arc::new(MockSearchIndex::new(0));
        let sync = Synchronizer::new(index.clone());

        let outcome = sync.propagate_delete(42).await;

        assert!(!outcome.is_stale());
        assert_eq!(index.delete_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_delete_reports_stale_after_two_failures() {
        let index = Arc::new(MockSearchIndex::new(0));
        let sync = Synchronizer::new(index.clone());

        sync.propagate_upsert(&product(1, "Widget")).await;
        index.fail_first.store(2, Ordering::SeqCst);
        let outcome = sync.propagate_delete(1).await;

        assert!(outcome.is_stale());
        assert_eq!(index.delete_calls.load(Ordering::SeqCst), 2);
    }
}
