//! OpenSearch index configuration and mappings.
//!
//! This module defines the index settings and mappings for the product
//! search index.

use serde_json::{json, Value};

/// Get the index settings and mappings for the product search index.
///
/// The configuration includes:
/// - a custom `lowercase_normalizer` so `name.lower` supports
///   case-insensitive exact and prefix lookups
/// - `name` as full text with `raw` (keyword) and `lower` (normalized
///   keyword) subfields
/// - `name_suggest` as a `completion` field for prefix suggestions
/// - `brand` as keyword for exact filtering, `price` as float for range
///   queries, `in_stock` as boolean for term filtering
pub fn index_body() -> Value {
    json!({
        "settings": {
            "analysis": {
                "normalizer": {
                    "lowercase_normalizer": {
                        "type": "custom",
                        "filter": ["lowercase"]
                    }
                }
            }
        },
        "mappings": {
            "properties": {
                "name": {
                    "type": "text",
                    "fields": {
                        "raw": { "type": "keyword" },
                        "lower": { "type": "keyword", "normalizer": "lowercase_normalizer" }
                    }
                },
                "name_suggest": {
                    "type": "completion"
                },
                "brand": { "type": "keyword" },
                "price": { "type": "float" },
                "in_stock": { "type": "boolean" },
                "indexed_at": { "type": "date" }
            }
        }
    })
}
