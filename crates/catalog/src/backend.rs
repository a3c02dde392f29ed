use crate::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

/// Rewrites a stored document in place. Receives the current bytes and returns
/// the replacement.
pub type UpdateFn<'a> = &'a mut dyn FnMut(&[u8]) -> Result<Vec<u8>, CatalogError>;

/// Trait for a key-value storage backend holding the books collection.
/// This allows for different storage implementations (e.g., in-memory, Redb).
pub trait CatalogBackend: Send + Sync {
    /// Insert or overwrite a document.
    fn put(&self, key: &str, value: &[u8]) -> Result<(), CatalogError>;
    /// Retrieve a document by key.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CatalogError>;
    /// Rewrite an existing document. Returns `false` without calling `update`
    /// when the key is absent.
    fn update(&self, key: &str, update: UpdateFn<'_>) -> Result<bool, CatalogError>;
    /// Delete a document, reporting whether one was removed.
    fn delete(&self, key: &str) -> Result<bool, CatalogError>;
    /// Delete every document, returning how many were removed.
    fn clear(&self) -> Result<usize, CatalogError>;
    /// Scan all documents in the backend, calling the visitor for each one.
    fn scan(
        &self,
        visitor: &mut dyn FnMut(&[u8]) -> Result<(), CatalogError>,
    ) -> Result<(), CatalogError>;
}

/// Configuration for selecting and building a backend.
///
/// Deserializes from a table tagged by `backend`:
///
/// ```toml
/// [storage]
/// backend = "redb"
/// path = "/data/bookshelf.redb"
/// ```
///
/// # Example
/// ```
/// use catalog::BackendConfig;
///
/// // In-memory (for testing)
/// let config = BackendConfig::in_memory();
///
/// // Redb (persistent)
/// let config = BackendConfig::redb("/data/bookshelf.redb");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum BackendConfig {
    /// Use Redb for storage. The `path` is the file path for the database.
    ///
    /// Requires the `backend-redb` feature (enabled by default).
    Redb { path: String },
    /// Keep the collection in process memory. Contents are lost on restart.
    #[default]
    #[serde(rename = "memory")]
    InMemory,
}

impl BackendConfig {
    pub fn in_memory() -> Self {
        BackendConfig::InMemory
    }

    pub fn redb<P: Into<String>>(path: P) -> Self {
        BackendConfig::Redb { path: path.into() }
    }

    /// Build the backend described by this configuration.
    pub fn build(&self) -> Result<Box<dyn CatalogBackend>, CatalogError> {
        match self {
            BackendConfig::InMemory => Ok(Box::new(InMemoryBackend::new())),
            BackendConfig::Redb { path } => {
                #[cfg(feature = "backend-redb")]
                {
                    Ok(Box::new(RedbBackend::open(path)?))
                }
                #[cfg(not(feature = "backend-redb"))]
                {
                    let _ = path;
                    Err(CatalogError::backend("redb backend disabled at compile time"))
                }
            }
        }
    }
}

/// An in-memory backend using a `RwLock` around a `HashMap`.
pub struct InMemoryBackend {
    records: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogBackend for InMemoryBackend {
    fn put(&self, key: &str, value: &[u8]) -> Result<(), CatalogError> {
        self.records
            .write()
            .map_err(|_| CatalogError::backend("poisoned lock"))?
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CatalogError> {
        let guard = self
            .records
            .read()
            .map_err(|_| CatalogError::backend("poisoned lock"))?;
        Ok(guard.get(key).cloned())
    }

    fn update(&self, key: &str, update: UpdateFn<'_>) -> Result<bool, CatalogError> {
        // The write lock spans read and rewrite so the update is atomic per document.
        let mut guard = self
            .records
            .write()
            .map_err(|_| CatalogError::backend("poisoned lock"))?;
        match guard.get_mut(key) {
            Some(current) => {
                *current = update(current)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete(&self, key: &str) -> Result<bool, CatalogError> {
        let removed = self
            .records
            .write()
            .map_err(|_| CatalogError::backend("poisoned lock"))?
            .remove(key);
        Ok(removed.is_some())
    }

    fn clear(&self) -> Result<usize, CatalogError> {
        let mut guard = self
            .records
            .write()
            .map_err(|_| CatalogError::backend("poisoned lock"))?;
        let removed = guard.len();
        guard.clear();
        Ok(removed)
    }

    fn scan(
        &self,
        visitor: &mut dyn FnMut(&[u8]) -> Result<(), CatalogError>,
    ) -> Result<(), CatalogError> {
        let guard = self
            .records
            .read()
            .map_err(|_| CatalogError::backend("poisoned lock"))?;
        for value in guard.values() {
            visitor(value)?;
        }
        Ok(())
    }
}

/// The Redb backend implementation.
#[cfg(feature = "backend-redb")]
pub mod redb;

#[cfg(feature = "backend-redb")]
pub use redb::RedbBackend;
