//! Bookshelf: a book catalog with per-book comments.
//!
//! This crate holds the catalog operations on top of the document store in
//! [`catalog`]. Each operation validates its single required field, performs
//! one storage round and returns either the document or a fixed [`Notice`]
//! string. Storage failures are the only errors.
//!
//! ```
//! use bookshelf::{BackendConfig, BookCatalog, BookStore, Notice};
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let catalog = BookCatalog::new(BookStore::new(&BackendConfig::in_memory()).unwrap());
//!
//! let outcome = catalog.create(Some(String::new())).await.unwrap();
//! assert_eq!(outcome.notice(), Some(Notice::MissingTitle));
//!
//! let book = catalog.create(Some("Beloved".into())).await.unwrap().document().unwrap();
//! let book = catalog.add_comment(&book.id, Some("stunning".into())).await.unwrap();
//! assert_eq!(book.document().unwrap().comments, vec!["stunning".to_string()]);
//! # });
//! ```

mod outcome;
mod service;

pub use catalog::{
    BackendConfig, Book, BookStore, BookSummary, CatalogBackend, CatalogError, InMemoryBackend,
    UpdateFn,
};
#[cfg(feature = "redb")]
pub use catalog::RedbBackend;
pub use outcome::{Notice, Outcome};
pub use service::BookCatalog;
