//! OpenSearch backend for the search index.

mod client;
mod index_config;
mod queries;

pub use client::OpenSearchIndex;
pub use index_config::index_body;
pub use queries::{
    build_autocomplete_query, build_completion_suggest_query, build_filter_query,
    build_fuzzy_query, build_term_suggest_query, SUGGEST_NAME,
};
