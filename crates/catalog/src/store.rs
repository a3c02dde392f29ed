use crate::{BackendConfig, Book, CatalogBackend, CatalogError};

/// Typed access to the `books` collection.
///
/// Documents are stored as JSON so they read back shaped exactly as they were
/// inserted. The store holds no state of its own beyond the backend handle.
pub struct BookStore {
    backend: Box<dyn CatalogBackend>,
}

impl BookStore {
    /// Build the configured backend and wrap it.
    pub fn new(config: &BackendConfig) -> Result<Self, CatalogError> {
        let backend = config.build()?;
        Ok(Self::with_backend(backend))
    }

    /// Wrap an already constructed backend (e.g. a test double).
    pub fn with_backend(backend: Box<dyn CatalogBackend>) -> Self {
        Self { backend }
    }

    /// Every stored book, in the backend's natural order.
    pub fn find_all(&self) -> Result<Vec<Book>, CatalogError> {
        let mut books = Vec::new();
        self.backend.scan(&mut |data| {
            books.push(decode(data)?);
            Ok(())
        })?;
        Ok(books)
    }

    pub fn find_by_id(&self, id: &str) -> Result<Option<Book>, CatalogError> {
        match self.backend.get(id)? {
            Some(data) => Ok(Some(decode(&data)?)),
            None => Ok(None),
        }
    }

    pub fn insert_one(&self, book: &Book) -> Result<(), CatalogError> {
        let payload = encode(book)?;
        self.backend.put(&book.id, &payload)
    }

    /// Overwrite the whole `comments` field of one book, leaving the title as
    /// stored. Returns `false` when no book has that id.
    pub fn set_comments(&self, id: &str, comments: &[String]) -> Result<bool, CatalogError> {
        self.backend.update(id, &mut |data| {
            let mut book = decode(data)?;
            book.comments = comments.to_vec();
            encode(&book)
        })
    }

    /// Remove one book, reporting whether it existed.
    pub fn delete_one(&self, id: &str) -> Result<bool, CatalogError> {
        self.backend.delete(id)
    }

    /// Remove every book, returning how many were removed.
    pub fn delete_many(&self) -> Result<usize, CatalogError> {
        self.backend.clear()
    }

    pub fn count(&self) -> Result<usize, CatalogError> {
        let mut count = 0;
        self.backend.scan(&mut |_| {
            count += 1;
            Ok(())
        })?;
        Ok(count)
    }
}

fn encode(book: &Book) -> Result<Vec<u8>, CatalogError> {
    serde_json::to_vec(book).map_err(|e| CatalogError::Encode(e.to_string()))
}

fn decode(data: &[u8]) -> Result<Book, CatalogError> {
    serde_json::from_slice(data).map_err(|e| CatalogError::Decode(e.to_string()))
}
