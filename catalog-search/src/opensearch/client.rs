//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of
//! `SearchIndexProvider` using the OpenSearch Rust client.

use std::future::Future;

use async_trait::async_trait;
use opensearch::{
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesDeleteParts, IndicesExistsParts},
    DeleteParts, IndexParts, OpenSearch, SearchParts,
};
use serde_json::Value;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::config::SearchConfig;
use crate::errors::SearchError;
use crate::interfaces::SearchIndexProvider;
use crate::opensearch::index_config::index_body;
use crate::opensearch::queries;
use catalog_shared::{ProductDocument, SearchFilter};

/// Search index backed by an OpenSearch-compatible engine.
///
/// Documents are keyed by the product id, so an index call for an existing
/// id replaces the previous document (upsert semantics). Every network call
/// is bounded by the configured timeout; an elapsed timeout surfaces as
/// [`SearchError::Timeout`].
pub struct OpenSearchIndex {
    client: OpenSearch,
    config: SearchConfig,
}

impl OpenSearchIndex {
    /// Create a new client connected to the specified URL.
    ///
    /// This only builds the transport; reachability is verified separately
    /// through [`SearchIndexProvider::health_check`] at startup.
    pub fn new(url: &str, config: SearchConfig) -> Result<Self, SearchError> {
        let parsed_url = Url::parse(url).map_err(|e| SearchError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(url = %url, index = %config.index, "Created search engine client");

        Ok(Self { client, config })
    }

    /// Bound a search engine call with the configured timeout.
    async fn bounded<T, F>(&self, fut: F) -> Result<T, SearchError>
    where
        F: Future<Output = Result<T, SearchError>>,
    {
        match tokio::time::timeout(self.config.timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(SearchError::Timeout(self.config.timeout)),
        }
    }

    /// Execute a search request body and return the parsed JSON response.
    async fn execute(&self, body: Value) -> Result<Value, SearchError> {
        let response = self
            .client
            .search(SearchParts::Index(&[&self.config.index]))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchError::query(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Search request failed");
            return Err(SearchError::query(format!(
                "Search failed with status {}: {}",
                status, error_body
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))
    }

    /// Extract product documents from the `hits.hits[]._source` entries of
    /// a search response. Malformed hits are skipped with a warning rather
    /// than failing the whole response.
    fn parse_hits(response: &Value) -> Vec<ProductDocument> {
        let hits = response["hits"]["hits"].as_array().cloned().unwrap_or_default();

        hits.iter()
            .filter_map(|hit| {
                match serde_json::from_value::<ProductDocument>(hit["_source"].clone()) {
                    Ok(doc) => Some(doc),
                    Err(e) => {
                        warn!(error = %e, "Skipping malformed search hit");
                        None
                    }
                }
            })
            .collect()
    }

    /// Interpret the status of an index-exists check.
    ///
    /// Only a 404 means the index is absent; any other non-2xx status is an
    /// engine-side failure and must not trigger a create attempt.
    fn index_presence(status: u16) -> Result<bool, SearchError> {
        match status {
            s if (200..300).contains(&s) => Ok(true),
            404 => Ok(false),
            s => Err(SearchError::index_management(format!(
                "Exists check failed with status {}",
                s
            ))),
        }
    }

    /// Extract suggestion texts from a suggester response.
    fn parse_suggestions(response: &Value) -> Vec<String> {
        let entries = response["suggest"][queries::SUGGEST_NAME]
            .as_array()
            .cloned()
            .unwrap_or_default();

        let mut suggestions = Vec::new();
        for entry in &entries {
            if let Some(options) = entry["options"].as_array() {
                for option in options {
                    if let Some(text) = option["text"].as_str() {
                        suggestions.push(text.to_string());
                    }
                }
            }
        }
        suggestions
    }
}

#[async_trait]
impl SearchIndexProvider for OpenSearchIndex {
    async fn index_document(&self, document: &ProductDocument) -> Result<(), SearchError> {
        let doc_id = document.id.to_string();

        self.bounded(async {
            let response = self
                .client
                .index(IndexParts::IndexId(&self.config.index, &doc_id))
                .body(document)
                .send()
                .await
                .map_err(|e| SearchError::index(e.to_string()))?;

            let status = response.status_code();
            if !status.is_success() {
                let error_body = response.text().await.unwrap_or_default();
                error!(status = %status, body = %error_body, "Index request failed");
                return Err(SearchError::index(format!(
                    "Index failed with status {}: {}",
                    status, error_body
                )));
            }

            debug!(product_id = document.id, "Document indexed");
            Ok(())
        })
        .await
    }

    async fn delete_document(&self, product_id: i64) -> Result<(), SearchError> {
        let doc_id = product_id.to_string();

        self.bounded(async {
            let response = self
                .client
                .delete(DeleteParts::IndexId(&self.config.index, &doc_id))
                .send()
                .await
                .map_err(|e| SearchError::delete(e.to_string()))?;

            let status = response.status_code();

            // 404 is acceptable - deleting an absent document is a no-op
            if !status.is_success() && status.as_u16() != 404 {
                let error_body = response.text().await.unwrap_or_default();
                error!(status = %status, body = %error_body, "Delete request failed");
                return Err(SearchError::delete(format!(
                    "Delete failed with status {}: {}",
                    status, error_body
                )));
            }

            debug!(product_id = product_id, "Document deleted");
            Ok(())
        })
        .await
    }

    async fn search(&self, filter: &SearchFilter) -> Result<Vec<ProductDocument>, SearchError> {
        let body = queries::build_filter_query(filter);
        let response = self.bounded(self.execute(body)).await?;
        Ok(Self::parse_hits(&response))
    }

    async fn autocomplete(&self, prefix: &str) -> Result<Vec<ProductDocument>, SearchError> {
        let body = queries::build_autocomplete_query(prefix);
        let response = self.bounded(self.execute(body)).await?;
        Ok(Self::parse_hits(&response))
    }

    async fn fuzzy_search(&self, text: &str) -> Result<Vec<ProductDocument>, SearchError> {
        let body = queries::build_fuzzy_query(text);
        let response = self.bounded(self.execute(body)).await?;
        Ok(Self::parse_hits(&response))
    }

    async fn suggest(&self, text: &str) -> Result<Vec<String>, SearchError> {
        let body = queries::build_term_suggest_query(text);
        let response = self.bounded(self.execute(body)).await?;
        Ok(Self::parse_suggestions(&response))
    }

    async fn suggest_complete(&self, prefix: &str) -> Result<Vec<String>, SearchError> {
        let body = queries::build_completion_suggest_query(prefix);
        let response = self.bounded(self.execute(body)).await?;
        Ok(Self::parse_suggestions(&response))
    }

    async fn ensure_index_exists(&self) -> Result<(), SearchError> {
        self.bounded(async {
            let response = self
                .client
                .indices()
                .exists(IndicesExistsParts::Index(&[&self.config.index]))
                .send()
                .await
                .map_err(|e| SearchError::index_management(e.to_string()))?;

            if Self::index_presence(response.status_code().as_u16())? {
                debug!(index = %self.config.index, "Search index already exists");
                return Ok(());
            }

            let response = self
                .client
                .indices()
                .create(IndicesCreateParts::Index(&self.config.index))
                .body(index_body())
                .send()
                .await
                .map_err(|e| SearchError::index_management(e.to_string()))?;

            let status = response.status_code();
            if !status.is_success() {
                let error_body = response.text().await.unwrap_or_default();
                return Err(SearchError::index_management(format!(
                    "Index creation failed with status {}: {}",
                    status, error_body
                )));
            }

            info!(index = %self.config.index, "Search index created");
            Ok(())
        })
        .await
    }

    async fn recreate_index(&self) -> Result<(), SearchError> {
        self.bounded(async {
            let response = self
                .client
                .indices()
                .delete(IndicesDeleteParts::Index(&[&self.config.index]))
                .send()
                .await
                .map_err(|e| SearchError::index_management(e.to_string()))?;

            let status = response.status_code();
            // 404 means the index never existed, which is fine for a recreate
            if !status.is_success() && status.as_u16() != 404 {
                let error_body = response.text().await.unwrap_or_default();
                return Err(SearchError::index_management(format!(
                    "Index deletion failed with status {}: {}",
                    status, error_body
                )));
            }

            info!(index = %self.config.index, "Search index dropped");
            Ok(())
        })
        .await?;

        self.ensure_index_exists().await
    }

    async fn health_check(&self) -> Result<bool, SearchError> {
        self.bounded(async {
            let response = self
                .client
                .ping()
                .send()
                .await
                .map_err(|e| SearchError::connection(e.to_string()))?;

            Ok(response.status_code().is_success())
        })
        .await
    }
}
