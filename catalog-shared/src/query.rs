//! Query types for the search endpoints.

use serde::{Deserialize, Serialize};

/// Structured filter for the `/search` endpoint.
///
/// All fields are optional; set fields are combined with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilter {
    /// Match on the brand field.
    pub brand: Option<String>,
    /// Lower bound on price (inclusive).
    pub price_min: Option<f64>,
    /// Upper bound on price (inclusive).
    pub price_max: Option<f64>,
    /// Filter on stock status.
    pub in_stock: Option<bool>,
}

impl SearchFilter {
    /// Whether any filter is set. An empty filter matches all documents.
    pub fn is_empty(&self) -> bool {
        self.brand.is_none()
            && self.price_min.is_none()
            && self.price_max.is_none()
            && self.in_stock.is_none()
    }

    /// Whether either price bound is set.
    pub fn has_price_range(&self) -> bool {
        self.price_min.is_some() || self.price_max.is_some()
    }
}
