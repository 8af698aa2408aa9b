//! Configuration types for the search index client.

use std::time::Duration;

/// The default search index name.
pub const DEFAULT_INDEX: &str = "products";

/// Default bound on every search engine call.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for the search index client.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Name of the index holding product documents.
    pub index: String,
    /// Upper bound on any single call to the search engine. A call that
    /// exceeds it is treated as a failed propagation (for writes) or a
    /// service-unavailable condition (for queries).
    pub timeout: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            index: DEFAULT_INDEX.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl SearchConfig {
    /// Create a config with a custom call timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }
}
