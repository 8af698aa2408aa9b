//! # Catalog Server
//!
//! Main library for the catalog search service.
//!
//! This crate provides the HTTP surface, the catalog service orchestration
//! (validate, commit to the record store, propagate to the search index,
//! respond), and the configuration wiring for the server and reindex
//! binaries.

pub mod config;
pub mod http;
pub mod service;

pub use config::Dependencies;
pub use service::{CatalogService, ServiceError};

use thiserror::Error;

/// Errors that can occur during server initialization or execution.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Record store error.
    #[error("Store error: {0}")]
    StoreError(#[from] catalog_store::StoreError),

    /// Search index error.
    #[error("Search error: {0}")]
    SearchError(#[from] catalog_search::SearchError),

    /// Reindex error.
    #[error("Sync error: {0}")]
    SyncError(#[from] catalog_sync::SyncError),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ServerError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
