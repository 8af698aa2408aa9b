//! Postgres implementation of the record store.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use tracing::{debug, info};

use crate::errors::StoreError;
use crate::interfaces::RecordStore;
use catalog_shared::{Product, ProductInput};

/// Maximum number of pooled connections.
const MAX_CONNECTIONS: u32 = 5;

/// Record store backed by a Postgres database.
///
/// Uses runtime-checked queries throughout so the crate builds without a
/// live database. `id` values are assigned by a `BIGSERIAL` column.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connect to the database at the given URL.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect(url)
            .await
            .map_err(|e| StoreError::connection(e.to_string()))?;

        info!(url = %url, "Connected to record store");

        Ok(Self { pool })
    }

    /// Create the products table if it does not exist.
    ///
    /// Called once at startup, before the service accepts traffic.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS products (
                id BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                brand TEXT NOT NULL,
                price DOUBLE PRECISION NOT NULL,
                in_stock BOOLEAN NOT NULL DEFAULT TRUE
            )",
        )
        .execute(&self.pool)
        .await?;

        debug!("Record store schema verified");
        Ok(())
    }

    fn row_to_product(row: &PgRow) -> Result<Product, StoreError> {
        Ok(Product {
            id: row.try_get("id").map_err(StoreError::from)?,
            name: row.try_get("name").map_err(StoreError::from)?,
            brand: row.try_get("brand").map_err(StoreError::from)?,
            price: row.try_get("price").map_err(StoreError::from)?,
            in_stock: row.try_get("in_stock").map_err(StoreError::from)?,
        })
    }
}

#[async_trait]
impl RecordStore for PostgresStore {
    async fn create(&self, input: ProductInput) -> Result<Product, StoreError> {
        let row = sqlx::query(
            "INSERT INTO products (name, brand, price, in_stock)
             VALUES ($1, $2, $3, $4)
             RETURNING id, name, brand, price, in_stock",
        )
        .bind(&input.name)
        .bind(&input.brand)
        .bind(input.price)
        .bind(input.in_stock)
        .fetch_one(&self.pool)
        .await?;

        let product = Self::row_to_product(&row)?;
        debug!(product_id = product.id, "Created product");
        Ok(product)
    }

    async fn get(&self, id: i64) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query(
            "SELECT id, name, brand, price, in_stock FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_product).transpose()
    }

    async fn list(&self, skip: i64, limit: i64) -> Result<Vec<Product>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, name, brand, price, in_stock FROM products
             ORDER BY id OFFSET $1 LIMIT $2",
        )
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_product).collect()
    }

    async fn all(&self) -> Result<Vec<Product>, StoreError> {
        let rows = sqlx::query("SELECT id, name, brand, price, in_stock FROM products")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::row_to_product).collect()
    }

    async fn update(&self, id: i64, input: ProductInput) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query(
            "UPDATE products SET name = $1, brand = $2, price = $3, in_stock = $4
             WHERE id = $5
             RETURNING id, name, brand, price, in_stock",
        )
        .bind(&input.name)
        .bind(&input.brand)
        .bind(input.price)
        .bind(input.in_stock)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_product).transpose()
    }

    async fn delete(&self, id: i64) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query(
            "DELETE FROM products WHERE id = $1
             RETURNING id, name, brand, price, in_stock",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_product).transpose()
    }
}
