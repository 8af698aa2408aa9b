//! HTTP surface for the catalog service.

mod error;
mod handlers;

pub use error::ApiError;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use crate::service::CatalogService;

/// Build the application router.
pub fn router(service: Arc<CatalogService>) -> Router {
    Router::new()
        .route(
            "/products",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/products/{id}",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .route("/search", get(handlers::search))
        .route("/autocomplete", get(handlers::autocomplete))
        .route("/fuzzy-search", get(handlers::fuzzy_search))
        .route("/suggest", get(handlers::suggest))
        .route("/suggest-complete", get(handlers::suggest_complete))
        .with_state(service)
}
