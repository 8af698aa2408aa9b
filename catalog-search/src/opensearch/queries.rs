//! OpenSearch query builders.
//!
//! This module provides pure functions building the request bodies for the
//! search, autocomplete, fuzzy, and suggestion endpoints. The produced JSON
//! shapes are part of the service's compatibility contract.

use serde_json::{json, Value};

use catalog_shared::SearchFilter;

/// Name under which suggestion queries are registered in the request body
/// and looked up in the response.
pub const SUGGEST_NAME: &str = "product-suggest";

/// Build a filtered search query.
///
/// Set filters are combined as `bool.must` clauses:
/// - `match` on `brand`
/// - `range` on `price` with `gte`/`lte` bounds
/// - `term` on `in_stock`
///
/// An empty filter produces an empty `must`, which matches all documents.
pub fn build_filter_query(filter: &SearchFilter) -> Value {
    let mut must_clauses = Vec::new();

    if let Some(ref brand) = filter.brand {
        must_clauses.push(json!({ "match": { "brand": brand } }));
    }

    if filter.has_price_range() {
        let mut bounds = serde_json::Map::new();
        if let Some(min) = filter.price_min {
            bounds.insert("gte".to_string(), json!(min));
        }
        if let Some(max) = filter.price_max {
            bounds.insert("lte".to_string(), json!(max));
        }
        must_clauses.push(json!({ "range": { "price": bounds } }));
    }

    if let Some(in_stock) = filter.in_stock {
        must_clauses.push(json!({ "term": { "in_stock": in_stock } }));
    }

    json!({
        "query": {
            "bool": {
                "must": must_clauses
            }
        }
    })
}

/// Build a case-insensitive prefix query on the product name.
///
/// Runs against the `name.lower` keyword subfield, which is normalized to
/// lowercase at index time; the query text is lowercased to match.
pub fn build_autocomplete_query(prefix: &str) -> Value {
    json!({
        "query": {
            "prefix": {
                "name.lower": prefix.to_lowercase()
            }
        }
    })
}

/// Build a fuzzy match query on the product name.
///
/// AUTO fuzziness allows variable edits based on query length:
/// 1-2 chars: 0 edits, 3-4 chars: 1 edit, 5+ chars: 2 edits.
pub fn build_fuzzy_query(text: &str) -> Value {
    json!({
        "query": {
            "match": {
                "name": {
                    "query": text,
                    "fuzziness": "AUTO"
                }
            }
        }
    })
}

/// Build a term-suggester query for correcting misspelled terms.
pub fn build_term_suggest_query(text: &str) -> Value {
    json!({
        "suggest": {
            SUGGEST_NAME: {
                "text": text,
                "term": {
                    "field": "name"
                }
            }
        }
    })
}

/// Build a completion-suggester query over `name_suggest`.
///
/// Fuzziness of 1 tolerates a single edit in the typed prefix.
pub fn build_completion_suggest_query(prefix: &str) -> Value {
    json!({
        "suggest": {
            SUGGEST_NAME: {
                "prefix": prefix,
                "completion": {
                    "field": "name_suggest",
                    "fuzzy": {
                        "fuzziness": 1
                    }
                }
            }
        }
    })
}
