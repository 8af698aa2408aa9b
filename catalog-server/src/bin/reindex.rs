//! Bulk reindex tool.
//!
//! Rebuilds the search index from the record store. By default runs a
//! non-destructive pass that upserts a projection for every stored product.
//! With `--recreate` the index is dropped and recreated with fresh mappings
//! first; that mode loses all documents until the pass completes and must
//! be requested explicitly.

use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use catalog_server::Dependencies;
use catalog_sync::Reindexer;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let recreate = match parse_args() {
        Ok(recreate) => recreate,
        Err(arg) => {
            eprintln!("Unknown argument: {}", arg);
            eprintln!("Usage: catalog-reindex [--recreate]");
            return ExitCode::FAILURE;
        }
    };

    let deps = match Dependencies::new().await {
        Ok(deps) => deps,
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return ExitCode::FAILURE;
        }
    };

    let reindexer = Reindexer::new(deps.store.clone(), deps.search.clone());

    let result = if recreate {
        info!("Running destructive reindex (drop and recreate index)");
        reindexer.run_destructive().await
    } else {
        reindexer.run().await
    };

    match result {
        Ok(summary) if summary.is_converged() => {
            info!(total = summary.total, "Reindex converged");
            ExitCode::SUCCESS
        }
        Ok(summary) => {
            error!(
                total = summary.total,
                synced = summary.synced,
                failed_ids = ?summary.failed_ids,
                "Reindex finished with failures; re-run to converge"
            );
            ExitCode::FAILURE
        }
        Err(e) => {
            error!(error = %e, "Reindex aborted");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether `--recreate` was passed, or the offending argument.
fn parse_args() -> Result<bool, String> {
    let mut recreate = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--recreate" => recreate = true,
            other => return Err(other.to_string()),
        }
    }
    Ok(recreate)
}
