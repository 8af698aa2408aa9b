//! Request handlers for the catalog HTTP surface.
//!
//! Mutation responses carry the committed product plus an `index_stale`
//! flag: `true` means the search index could not be updated and lags the
//! record store until the next reindex pass. Search responses are views of
//! a possibly-stale projection of the record store.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::http::error::ApiError;
use crate::service::{CatalogService, MutationResult};
use catalog_shared::{Product, ProductDocument, ProductInput, SearchFilter};

/// Default page size for product listing.
const DEFAULT_LIMIT: i64 = 10;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

#[derive(Debug, Deserialize)]
pub struct QueryText {
    pub q: String,
}

/// Response body for mutating operations.
#[derive(Debug, Serialize)]
pub struct MutationResponse {
    #[serde(flatten)]
    pub product: Product,
    /// The search index may lag the record store for this product.
    pub index_stale: bool,
}

impl From<MutationResult> for MutationResponse {
    fn from(result: MutationResult) -> Self {
        Self {
            product: result.product,
            index_stale: result.index_stale,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ResultsResponse {
    pub results: Vec<ProductDocument>,
}

#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<String>,
}

pub async fn create_product(
    State(service): State<Arc<CatalogService>>,
    Json(input): Json<ProductInput>,
) -> Result<Json<MutationResponse>, ApiError> {
    let result = service.create_product(input).await?;
    Ok(Json(result.into()))
}

pub async fn list_products(
    State(service): State<Arc<CatalogService>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = service.list_products(params.skip, params.limit).await?;
    Ok(Json(products))
}

pub async fn get_product(
    State(service): State<Arc<CatalogService>>,
    Path(id): Path<i64>,
) -> Result<Json<Product>, ApiError> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

pub async fn update_product(
    State(service): State<Arc<CatalogService>>,
    Path(id): Path<i64>,
    Json(input): Json<ProductInput>,
) -> Result<Json<MutationResponse>, ApiError> {
    let result = service.update_product(id, input).await?;
    Ok(Json(result.into()))
}

pub async fn delete_product(
    State(service): State<Arc<CatalogService>>,
    Path(id): Path<i64>,
) -> Result<Json<MutationResponse>, ApiError> {
    let result = service.delete_product(id).await?;
    Ok(Json(result.into()))
}

pub async fn search(
    State(service): State<Arc<CatalogService>>,
    Query(filter): Query<SearchFilter>,
) -> Result<Json<ResultsResponse>, ApiError> {
    let results = service.search(&filter).await?;
    Ok(Json(ResultsResponse { results }))
}

pub async fn autocomplete(
    State(service): State<Arc<CatalogService>>,
    Query(params): Query<QueryText>,
) -> Result<Json<ResultsResponse>, ApiError> {
    let results = service.autocomplete(&params.q).await?;
    Ok(Json(ResultsResponse { results }))
}

pub async fn fuzzy_search(
    State(service): State<Arc<CatalogService>>,
    Query(params): Query<QueryText>,
) -> Result<Json<ResultsResponse>, ApiError> {
    let results = service.fuzzy_search(&params.q).await?;
    Ok(Json(ResultsResponse { results }))
}

pub async fn suggest(
    State(service): State<Arc<CatalogService>>,
    Query(params): Query<QueryText>,
) -> Result<Json<SuggestionsResponse>, ApiError> {
    let suggestions = service.suggest(&params.q).await?;
    Ok(Json(SuggestionsResponse { suggestions }))
}

pub async fn suggest_complete(
    State(service): State<Arc<CatalogService>>,
    Query(params): Query<QueryText>,
) -> Result<Json<SuggestionsResponse>, ApiError> {
    let suggestions = service.suggest_complete(&params.q).await?;
    Ok(Json(SuggestionsResponse { suggestions }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutation_response_shape() {
        let response = MutationResponse {
            product: Product {
                id: 1,
                name: "Widget".to_string(),
                brand: "Acme".to_string(),
                price: 5.0,
                in_stock: true,
            },
            index_stale: true,
        };

        let value = serde_json::to_value(&response).unwrap();

        // Product fields are flattened alongside the staleness flag
        assert_eq!(value["id"], 1);
        assert_eq!(value["name"], "Widget");
        assert_eq!(value["index_stale"], true);
    }

    #[test]
    fn test_list_params_defaults() {
        let params: ListParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.skip, 0);
        assert_eq!(params.limit, 10);
    }
}
