//! Startup orchestration.
//!
//! Order: config is already validated, then storage is opened, then the
//! listener is bound. Any failure here is fatal.

use std::path::Path;

use tokio::net::TcpListener;

use crate::config::{ApiConfig, StorageConfig};
use crate::http::HttpServer;
use crate::storage::{MemoryStore, StorageError};

/// Open the document store, restoring the snapshot when one is configured.
pub fn open_store(config: &StorageConfig) -> Result<MemoryStore, StorageError> {
    match &config.snapshot_path {
        Some(path) => MemoryStore::load_from_file(Path::new(path)),
        None => {
            tracing::warn!("No storage snapshot configured; data is kept in memory only");
            Ok(MemoryStore::new(None))
        }
    }
}

/// Build the server and bind its listener.
pub async fn prepare(config: ApiConfig) -> Result<(HttpServer, TcpListener), Box<dyn std::error::Error>> {
    let store = open_store(&config.storage)?;
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    Ok((HttpServer::new(config, store), listener))
}
