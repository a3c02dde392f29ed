//! Redb (Rust embedded database) backend for the books collection.
//!
//! Every mutating call runs in its own write transaction, so a single
//! insert, update, delete or clear is atomic and durable once it returns.
//!
//! # Configuration Example
//! ```toml
//! [storage]
//! backend = "redb"
//! path = "/data/bookshelf.redb"
//! ```

use crate::backend::UpdateFn;
use crate::{CatalogBackend, CatalogError};
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::path::Path;
use std::sync::Arc;

const BOOKS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("books");

/// Redb backend implementation for persistent document storage.
///
/// The `Arc<Database>` wrapper allows safe sharing across threads; redb
/// handles its own internal locking and MVCC.
pub struct RedbBackend {
    db: Arc<Database>,
}

impl RedbBackend {
    /// Open or create a Redb database at the given path.
    ///
    /// # Example
    /// ```no_run
    /// use catalog::RedbBackend;
    ///
    /// let backend = RedbBackend::open("/tmp/books.redb").unwrap();
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let db = Database::create(path).map_err(CatalogError::backend)?;

        // Accessing the table creates it if it doesn't exist
        let write_txn = db.begin_write().map_err(CatalogError::backend)?;
        {
            let _table = write_txn
                .open_table(BOOKS_TABLE)
                .map_err(CatalogError::backend)?;
        }
        write_txn.commit().map_err(CatalogError::backend)?;

        tracing::debug!("opened redb catalog");
        Ok(Self { db: Arc::new(db) })
    }
}

impl CatalogBackend for RedbBackend {
    fn put(&self, key: &str, value: &[u8]) -> Result<(), CatalogError> {
        let write_txn = self.db.begin_write().map_err(CatalogError::backend)?;
        {
            let mut table = write_txn
                .open_table(BOOKS_TABLE)
                .map_err(CatalogError::backend)?;
            table.insert(key, value).map_err(CatalogError::backend)?;
        }
        write_txn.commit().map_err(CatalogError::backend)?;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CatalogError> {
        let read_txn = self.db.begin_read().map_err(CatalogError::backend)?;
        let table = read_txn
            .open_table(BOOKS_TABLE)
            .map_err(CatalogError::backend)?;

        match table.get(key).map_err(CatalogError::backend)? {
            Some(value) => Ok(Some(value.value().to_vec())),
            None => Ok(None),
        }
    }

    fn update(&self, key: &str, update: UpdateFn<'_>) -> Result<bool, CatalogError> {
        let write_txn = self.db.begin_write().map_err(CatalogError::backend)?;
        let matched = {
            let mut table = write_txn
                .open_table(BOOKS_TABLE)
                .map_err(CatalogError::backend)?;
            let current = table
                .get(key)
                .map_err(CatalogError::backend)?
                .map(|value| value.value().to_vec());
            match current {
                Some(current) => {
                    let next = update(&current)?;
                    table
                        .insert(key, next.as_slice())
                        .map_err(CatalogError::backend)?;
                    true
                }
                None => false,
            }
        };
        write_txn.commit().map_err(CatalogError::backend)?;
        Ok(matched)
    }

    fn delete(&self, key: &str) -> Result<bool, CatalogError> {
        let write_txn = self.db.begin_write().map_err(CatalogError::backend)?;
        let removed = {
            let mut table = write_txn
                .open_table(BOOKS_TABLE)
                .map_err(CatalogError::backend)?;
            let removed = table.remove(key).map_err(CatalogError::backend)?.is_some();
            removed
        };
        write_txn.commit().map_err(CatalogError::backend)?;
        Ok(removed)
    }

    fn clear(&self) -> Result<usize, CatalogError> {
        let write_txn = self.db.begin_write().map_err(CatalogError::backend)?;
        let removed = {
            let mut table = write_txn
                .open_table(BOOKS_TABLE)
                .map_err(CatalogError::backend)?;
            let mut keys = Vec::new();
            for item in table.iter().map_err(CatalogError::backend)? {
                let (key, _) = item.map_err(CatalogError::backend)?;
                keys.push(key.value().to_string());
            }
            for key in &keys {
                table
                    .remove(key.as_str())
                    .map_err(CatalogError::backend)?;
            }
            keys.len()
        };
        write_txn.commit().map_err(CatalogError::backend)?;
        Ok(removed)
    }

    fn scan(
        &self,
        visitor: &mut dyn FnMut(&[u8]) -> Result<(), CatalogError>,
    ) -> Result<(), CatalogError> {
        let read_txn = self.db.begin_read().map_err(CatalogError::backend)?;
        let table = read_txn
            .open_table(BOOKS_TABLE)
            .map_err(CatalogError::backend)?;

        for item in table.iter().map_err(CatalogError::backend)? {
            let (_, value) = item.map_err(CatalogError::backend)?;
            visitor(value.value())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_redb_backend_roundtrip() {
        let temp_file = NamedTempFile::new().unwrap();
        let backend = RedbBackend::open(temp_file.path()).unwrap();

        backend.put("key1", b"value1").unwrap();
        assert_eq!(backend.get("key1").unwrap(), Some(b"value1".to_vec()));
        assert_eq!(backend.get("nonexistent").unwrap(), None);
    }

    #[test]
    fn test_redb_backend_update() {
        let temp_file = NamedTempFile::new().unwrap();
        let backend = RedbBackend::open(temp_file.path()).unwrap();

        backend.put("key1", b"value1").unwrap();
        assert!(backend
            .update("key1", &mut |_| Ok(b"value2".to_vec()))
            .unwrap());
        assert_eq!(backend.get("key1").unwrap(), Some(b"value2".to_vec()));

        assert!(!backend
            .update("nonexistent", &mut |_| Ok(b"value3".to_vec()))
            .unwrap());
        assert_eq!(backend.get("nonexistent").unwrap(), None);
    }

    #[test]
    fn test_redb_backend_delete() {
        let temp_file = NamedTempFile::new().unwrap();
        let backend = RedbBackend::open(temp_file.path()).unwrap();

        backend.put("key1", b"value1").unwrap();
        assert!(backend.delete("key1").unwrap());
        assert!(!backend.delete("key1").unwrap());
        assert_eq!(backend.get("key1").unwrap(), None);
    }

    #[test]
    fn test_redb_backend_clear_and_scan() {
        let temp_file = NamedTempFile::new().unwrap();
        let backend = RedbBackend::open(temp_file.path()).unwrap();

        backend.put("key1", b"value1").unwrap();
        backend.put("key2", b"value2").unwrap();

        let mut collected = Vec::new();
        backend
            .scan(&mut |value| {
                collected.push(value.to_vec());
                Ok(())
            })
            .unwrap();
        assert_eq!(collected.len(), 2);
        assert!(collected.contains(&b"value1".to_vec()));

        assert_eq!(backend.clear().unwrap(), 2);
        assert_eq!(backend.clear().unwrap(), 0);
        assert_eq!(backend.get("key2").unwrap(), None);
    }

    #[test]
    fn test_redb_backend_persists_across_reopen() {
        let temp_file = NamedTempFile::new().unwrap();
        {
            let backend = RedbBackend::open(temp_file.path()).unwrap();
            backend.put("key1", b"value1").unwrap();
        }
        let backend = RedbBackend::open(temp_file.path()).unwrap();
        assert_eq!(backend.get("key1").unwrap(), Some(b"value1".to_vec()));
    }
}
