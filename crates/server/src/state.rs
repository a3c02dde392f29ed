use crate::config::ServerConfig;
use crate::error::ServerResult;
use bookshelf::{BookCatalog, BookStore};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Catalog operations over the configured store (shared across requests)
    pub catalog: BookCatalog,
}

impl ServerState {
    /// Create new server state, opening the configured storage backend
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let store = BookStore::new(&config.storage)?;
        Ok(Self::with_catalog(config, BookCatalog::new(store)))
    }

    /// Create server state around an existing catalog (e.g. a test double)
    pub fn with_catalog(config: ServerConfig, catalog: BookCatalog) -> Self {
        Self {
            config: Arc::new(config),
            catalog,
        }
    }
}
