// Sales Insights - Web Server
// Listens immediately; the transaction collection is fetched in the background

use anyhow::{Context, Result};
use sales_insights::api::{self, AppState};
use sales_insights::{loader, logging, Config, TransactionStore};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let config = Config::from_env().context("Failed to read configuration")?;
    let store = Arc::new(TransactionStore::new());

    // One-shot load. Until it succeeds every query answers 503.
    let loader_store = Arc::clone(&store);
    let source = config.data_source.clone();
    let timeout = config.fetch_timeout;
    tokio::spawn(async move {
        match loader::load_into(&loader_store, &source, timeout).await {
            Ok(count) => info!(records = count, %source, "transaction data ready"),
            Err(e) => error!(%source, error = %e, "transaction data unavailable; queries will fail"),
        }
    });

    let app = api::router(AppState::new(store));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, "server listening");
    axum::serve(listener, app).await.context("Server stopped with an error")?;

    Ok(())
}
