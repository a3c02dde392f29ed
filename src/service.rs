use crate::outcome::{Notice, Outcome};
use catalog::{Book, BookStore, BookSummary, CatalogError};
use std::sync::Arc;

/// The catalog operations, one storage round per request.
///
/// Cloning is cheap: clones share the injected store. Validation outcomes come
/// back as [`Notice`]s; only storage failures are errors.
#[derive(Clone)]
pub struct BookCatalog {
    store: Arc<BookStore>,
}

impl BookCatalog {
    pub fn new(store: BookStore) -> Self {
        Self::with_store(Arc::new(store))
    }

    pub fn with_store(store: Arc<BookStore>) -> Self {
        Self { store }
    }

    /// Summaries of every stored book.
    pub async fn list(&self) -> Result<Vec<BookSummary>, CatalogError> {
        let books = self.blocking(|store| store.find_all()).await?;
        tracing::debug!(count = books.len(), "listed books");
        Ok(books.into_iter().map(BookSummary::from).collect())
    }

    /// Store a new book with no comments. An empty or absent title stores
    /// nothing.
    pub async fn create(&self, title: Option<String>) -> Result<Outcome<Book>, CatalogError> {
        let Some(title) = title.filter(|title| !title.is_empty()) else {
            return Ok(Notice::MissingTitle.into());
        };

        let book = Book::new(title);
        let stored = book.clone();
        self.blocking(move |store| store.insert_one(&stored)).await?;

        tracing::info!(book_id = %book.id, "book created");
        Ok(Outcome::Document(book))
    }

    pub async fn delete_all(&self) -> Result<Notice, CatalogError> {
        let removed = self.blocking(|store| store.delete_many()).await?;
        tracing::info!(removed, "deleted all books");
        Ok(Notice::CompleteDeleteSuccessful)
    }

    pub async fn get(&self, id: &str) -> Result<Outcome<Book>, CatalogError> {
        let key = id.to_string();
        let book = self.blocking(move |store| store.find_by_id(&key)).await?;
        Ok(match book {
            Some(book) => Outcome::Document(book),
            None => Notice::NoBook.into(),
        })
    }

    /// Append one comment to a book.
    ///
    /// The comment is checked before the book is looked up. The whole comment
    /// list is read, extended in memory and written back; two appends racing
    /// on the same book can lose one of them.
    pub async fn add_comment(
        &self,
        id: &str,
        comment: Option<String>,
    ) -> Result<Outcome<Book>, CatalogError> {
        let Some(comment) = comment.filter(|comment| !comment.is_empty()) else {
            return Ok(Notice::MissingComment.into());
        };

        let key = id.to_string();
        let outcome = self
            .blocking(move |store| -> Result<Outcome<Book>, CatalogError> {
                let Some(mut book) = store.find_by_id(&key)? else {
                    return Ok(Notice::NoBook.into());
                };
                book.comments.push(comment);
                // Deleted between the read and the write.
                if !store.set_comments(&book.id, &book.comments)? {
                    return Ok(Notice::NoBook.into());
                }
                Ok(Outcome::Document(book))
            })
            .await?;

        if let Outcome::Document(book) = &outcome {
            tracing::info!(book_id = %book.id, comments = book.comments.len(), "comment added");
        }
        Ok(outcome)
    }

    pub async fn delete(&self, id: &str) -> Result<Notice, CatalogError> {
        let key = id.to_string();
        let removed = self.blocking(move |store| store.delete_one(&key)).await?;
        if removed {
            tracing::info!(book_id = %id, "book deleted");
            Ok(Notice::DeleteSuccessful)
        } else {
            Ok(Notice::NoBook)
        }
    }

    pub async fn count(&self) -> Result<usize, CatalogError> {
        self.blocking(|store| store.count()).await
    }

    async fn blocking<T, F>(&self, op: F) -> Result<T, CatalogError>
    where
        F: FnOnce(&BookStore) -> Result<T, CatalogError> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || op(&store))
            .await
            .map_err(CatalogError::backend)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{BackendConfig, CatalogBackend, InMemoryBackend};

    fn catalog() -> BookCatalog {
        BookCatalog::new(BookStore::new(&BackendConfig::in_memory()).unwrap())
    }

    async fn created(catalog: &BookCatalog, title: &str) -> Book {
        catalog
            .create(Some(title.to_string()))
            .await
            .unwrap()
            .document()
            .expect("book should be created")
    }

    #[tokio::test]
    async fn create_returns_stored_book_with_empty_comments() {
        let catalog = catalog();
        let book = created(&catalog, "A New Book Title").await;

        assert_eq!(book.title, "A New Book Title");
        assert!(book.comments.is_empty());
        assert!(!book.id.is_empty());
        assert_eq!(catalog.get(&book.id).await.unwrap(), Outcome::Document(book));
    }

    #[tokio::test]
    async fn create_without_title_stores_nothing() {
        let catalog = catalog();

        for title in [None, Some(String::new())] {
            let outcome = catalog.create(title).await.unwrap();
            assert_eq!(outcome.notice(), Some(Notice::MissingTitle));
        }
        assert_eq!(catalog.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn list_reports_comment_counts() {
        let catalog = catalog();
        let book = created(&catalog, "Counted").await;
        catalog
            .add_comment(&book.id, Some("one".into()))
            .await
            .unwrap();
        catalog
            .add_comment(&book.id, Some("two".into()))
            .await
            .unwrap();

        let summaries = catalog.list().await.unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].id, book.id);
        assert_eq!(summaries[0].commentcount, 2);
    }

    #[tokio::test]
    async fn get_unknown_id_is_no_book() {
        let catalog = catalog();
        let outcome = catalog.get("invalidid").await.unwrap();
        assert_eq!(outcome.notice(), Some(Notice::NoBook));
    }

    #[tokio::test]
    async fn add_comment_appends_in_order() {
        let catalog = catalog();
        let book = created(&catalog, "Commented").await;

        catalog
            .add_comment(&book.id, Some("first".into()))
            .await
            .unwrap();
        let updated = catalog
            .add_comment(&book.id, Some("second".into()))
            .await
            .unwrap()
            .document()
            .unwrap();

        assert_eq!(updated.comments, vec!["first".to_string(), "second".to_string()]);
        assert_eq!(updated.title, "Commented");

        let stored = catalog.get(&book.id).await.unwrap().document().unwrap();
        assert_eq!(stored.comments, updated.comments);
    }

    #[tokio::test]
    async fn missing_comment_is_checked_before_lookup() {
        let catalog = catalog();
        let book = created(&catalog, "Quiet").await;

        for id in [book.id.as_str(), "invalidid"] {
            let outcome = catalog.add_comment(id, Some(String::new())).await.unwrap();
            assert_eq!(outcome.notice(), Some(Notice::MissingComment));
            let outcome = catalog.add_comment(id, None).await.unwrap();
            assert_eq!(outcome.notice(), Some(Notice::MissingComment));
        }
    }

    #[tokio::test]
    async fn comment_on_unknown_id_is_no_book() {
        let catalog = catalog();
        let outcome = catalog
            .add_comment("invalidid", Some("hello".into()))
            .await
            .unwrap();
        assert_eq!(outcome.notice(), Some(Notice::NoBook));
        assert_eq!(catalog.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn delete_then_get_is_no_book() {
        let catalog = catalog();
        let book = created(&catalog, "Doomed").await;

        assert_eq!(catalog.delete(&book.id).await.unwrap(), Notice::DeleteSuccessful);
        assert_eq!(catalog.delete(&book.id).await.unwrap(), Notice::NoBook);
        assert_eq!(
            catalog.get(&book.id).await.unwrap().notice(),
            Some(Notice::NoBook)
        );
    }

    #[tokio::test]
    async fn delete_all_is_idempotent() {
        let catalog = catalog();
        created(&catalog, "One").await;
        created(&catalog, "Two").await;

        assert_eq!(
            catalog.delete_all().await.unwrap(),
            Notice::CompleteDeleteSuccessful
        );
        assert!(catalog.list().await.unwrap().is_empty());
        assert_eq!(
            catalog.delete_all().await.unwrap(),
            Notice::CompleteDeleteSuccessful
        );
    }

    /// Serves reads from an inner backend but finds nothing to update, as if
    /// the book vanished between the read and the write.
    struct VanishingBackend(InMemoryBackend);

    impl CatalogBackend for VanishingBackend {
        fn put(&self, key: &str, value: &[u8]) -> Result<(), CatalogError> {
            self.0.put(key, value)
        }
        fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CatalogError> {
            self.0.get(key)
        }
        fn update(
            &self,
            _key: &str,
            _update: catalog::UpdateFn<'_>,
        ) -> Result<bool, CatalogError> {
            Ok(false)
        }
        fn delete(&self, key: &str) -> Result<bool, CatalogError> {
            self.0.delete(key)
        }
        fn clear(&self) -> Result<usize, CatalogError> {
            self.0.clear()
        }
        fn scan(
            &self,
            visitor: &mut dyn FnMut(&[u8]) -> Result<(), CatalogError>,
        ) -> Result<(), CatalogError> {
            self.0.scan(visitor)
        }
    }

    #[tokio::test]
    async fn comment_on_book_deleted_mid_update_is_no_book() {
        let catalog = BookCatalog::new(BookStore::with_backend(Box::new(VanishingBackend(
            InMemoryBackend::new(),
        ))));
        let book = created(&catalog, "Fleeting").await;

        let outcome = catalog
            .add_comment(&book.id, Some("too late".into()))
            .await
            .unwrap();
        assert_eq!(outcome.notice(), Some(Notice::NoBook));
    }
}
