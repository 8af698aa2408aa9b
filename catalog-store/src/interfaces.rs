//! Record store trait definition.
//!
//! This module defines the abstract interface for the system of record,
//! allowing for different backend implementations (Postgres, in-memory).

use async_trait::async_trait;

use crate::errors::StoreError;
use catalog_shared::{Product, ProductInput};

/// Abstracts the relational system of record for products.
///
/// Implementations are injected into the catalog service and the bulk
/// reindexer, enabling dependency injection and easy testing with the
/// in-memory implementation.
///
/// Operations on a missing id return `Ok(None)` rather than an error; the
/// caller decides whether absence is a not-found condition. `Err` is
/// reserved for infrastructure failures.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a new product and return it with its assigned id.
    async fn create(&self, input: ProductInput) -> Result<Product, StoreError>;

    /// Fetch a product by id, or `None` if absent.
    async fn get(&self, id: i64) -> Result<Option<Product>, StoreError>;

    /// List products ordered by id, with offset/limit pagination.
    async fn list(&self, skip: i64, limit: i64) -> Result<Vec<Product>, StoreError>;

    /// Fetch every product, in any order. Used by the bulk reindexer.
    async fn all(&self) -> Result<Vec<Product>, StoreError>;

    /// Fully replace a product's fields. Returns the updated product, or
    /// `None` if no product exists with the given id.
    async fn update(&self, id: i64, input: ProductInput) -> Result<Option<Product>, StoreError>;

    /// Delete a product. Returns its prior state, or `None` if absent.
    async fn delete(&self, id: i64) -> Result<Option<Product>, StoreError>;
}
