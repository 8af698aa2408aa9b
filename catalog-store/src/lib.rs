//! # Catalog Store
//!
//! This crate provides the record store side of the catalog service: the
//! abstract `RecordStore` trait, its error types, a Postgres implementation,
//! and an in-memory implementation used by tests and local development.
//!
//! The record store is the system of record for products. The search index
//! is a derived projection of its contents and is never consulted here.

pub mod errors;
pub mod interfaces;
pub mod memory;
pub mod postgres;

pub use errors::StoreError;
pub use interfaces::RecordStore;
pub use memory::MemoryStore;
pub use postgres::PostgresStore;
