//! Search index projection of a product.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Product;

/// Weight applied to completion suggestions built from the product name.
const SUGGEST_WEIGHT: i32 = 10;

/// Completion-suggester payload built from the product name.
///
/// Stored in the `name_suggest` field of the index, which is mapped as a
/// `completion` type and queried by the suggest-complete endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameSuggest {
    /// Input texts the completion suggester matches prefixes against.
    pub input: Vec<String>,
    /// Suggestion weight for ranking.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<i32>,
}

/// The document stored in the search index, keyed by the product id.
///
/// This is a projection of [`Product`] plus the derived `name_suggest`
/// payload; it carries no independent state. The record store remains the
/// source of truth and the index converges to it through propagation or a
/// bulk reindex pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDocument {
    pub id: i64,
    pub name: String,
    pub brand: String,
    pub price: f64,
    pub in_stock: bool,
    /// Completion payload derived from `name`.
    pub name_suggest: NameSuggest,
    /// When this projection was built.
    pub indexed_at: DateTime<Utc>,
}

impl ProductDocument {
    /// Build the projection for a product, stamped with the current time.
    ///
    /// The projection is a pure function of the product apart from the
    /// timestamp, so re-projecting the same product yields a document with
    /// identical data fields (upsert idempotence).
    pub fn project(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            brand: product.brand.clone(),
            price: product.price,
            in_stock: product.in_stock,
            name_suggest: NameSuggest {
                input: vec![product.name.clone()],
                weight: Some(SUGGEST_WEIGHT),
            },
            indexed_at: Utc::now(),
        }
    }

    /// Whether this document carries the same data as the given product.
    pub fn matches(&self, product: &Product) -> bool {
        self.id == product.id
            && self.name == product.name
            && self.brand == product.brand
            && self.price == product.price
            && self.in_stock == product.in_stock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            id: 7,
            name: "IPhone 21 Pro Max".to_string(),
            brand: "Apple".to_string(),
            price: 1999.0,
            in_stock: true,
        }
    }

    #[test]
    fn test_projection_fields() {
        let doc = ProductDocument::project(&product());

        assert_eq!(doc.id, 7);
        assert_eq!(doc.name, "IPhone 21 Pro Max");
        assert_eq!(doc.brand, "Apple");
        assert_eq!(doc.price, 1999.0);
        assert!(doc.in_stock);
        assert_eq!(doc.name_suggest.input, vec!["IPhone 21 Pro Max"]);
        assert_eq!(doc.name_suggest.weight, Some(10));
    }

    #[test]
    fn test_projection_is_deterministic_in_data() {
        let p = product();
        let first = ProductDocument::project(&p);
        let second = ProductDocument::project(&p);

        // Only the timestamp may differ between projections.
        assert!(first.matches(&p));
        assert!(second.matches(&p));
        assert_eq!(first.name_suggest, second.name_suggest);
    }

    #[test]
    fn test_serialized_shape() {
        let doc = ProductDocument::project(&product());
        let value = serde_json::to_value(&doc).unwrap();

        assert_eq!(value["name_suggest"]["input"][0], "IPhone 21 Pro Max");
        assert_eq!(value["name_suggest"]["weight"], 10);
        assert!(value["indexed_at"].is_string());
    }

    #[test]
    fn test_matches_detects_divergence() {
        let p = product();
        let mut doc = ProductDocument::project(&p);
        doc.price = 1.0;
        assert!(!doc.matches(&p));
    }
}
