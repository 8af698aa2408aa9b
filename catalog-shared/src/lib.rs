//! # Catalog Shared
//!
//! Shared types and data structures for the catalog search service.
//!
//! This crate defines the canonical `Product` entity owned by the record
//! store, the `ProductDocument` projection materialized into the search
//! index, and the query types exchanged between the HTTP surface and the
//! search repository.

pub mod document;
pub mod product;
pub mod query;

pub use document::{NameSuggest, ProductDocument};
pub use product::{Product, ProductInput, ValidationError};
pub use query::SearchFilter;
