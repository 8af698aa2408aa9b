//! # Catalog Sync
//!
//! This crate provides the synchronization layer between the record store
//! (system of record) and the search index (derived projection).
//!
//! ## Architecture
//!
//! Two components keep the stores convergent:
//!
//! 1. **Synchronizer**: propagates each committed mutation to the search
//!    index inline, with a warn-and-reconcile failure policy
//! 2. **Reindexer**: rebuilds the index in full from the record store,
//!    recovering any propagation that was lost
//!
//! There is deliberately no cross-store transaction: a record store commit
//! followed by an index write is two sequential network calls, and a failed
//! second call leaves the index stale until the next reindex pass.

pub mod errors;
pub mod reindexer;
pub mod synchronizer;

pub use errors::SyncError;
pub use reindexer::{Reindexer, ReindexSummary};
pub use synchronizer::{SyncOutcome, Synchronizer};
