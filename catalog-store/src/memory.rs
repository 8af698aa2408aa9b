//! In-memory record store implementation.
//!
//! Backs tests and local development. Mirrors the Postgres implementation's
//! semantics: sequential id assignment, id-ordered listing, full-replacement
//! updates.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::StoreError;
use crate::interfaces::RecordStore;
use catalog_shared::{Product, ProductInput};

/// Record store held entirely in process memory.
#[derive(Default)]
pub struct MemoryStore {
    products: RwLock<BTreeMap<i64, Product>>,
    next_id: AtomicI64,
}

impl MemoryStore {
    /// Create an empty store. The first assigned id is 1.
    pub fn new() -> Self {
        Self {
            products: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn create(&self, input: ProductInput) -> Result<Product, StoreError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let product = input.into_product(id);
        self.products.write().await.insert(id, product.clone());
        Ok(product)
    }

    async fn get(&self, id: i64) -> Result<Option<Product>, StoreError> {
        Ok(self.products.read().await.get(&id).cloned())
    }

    async fn list(&self, skip: i64, limit: i64) -> Result<Vec<Product>, StoreError> {
        let products = self.products.read().await;
        Ok(products
            .values()
            .skip(skip.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn all(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.products.read().await.values().cloned().collect())
    }

    async fn update(&self, id: i64, input: ProductInput) -> Result<Option<Product>, StoreError> {
        let mut products = self.products.write().await;
        if !products.contains_key(&id) {
            return Ok(None);
        }
        let product = input.into_product(id);
        products.insert(id, product.clone());
        Ok(Some(product))
    }

    async fn delete(&self, id: i64) -> Result<Option<Product>, StoreError> {
        Ok(self.products.write().await.remove(&id))
    }
}
