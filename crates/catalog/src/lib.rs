//! # Bookshelf Catalog
//!
//! Document storage for the bookshelf service. A single logical `books`
//! collection is kept behind a backend-agnostic key-value interface, with a
//! typed [`BookStore`] on top that speaks in [`Book`] documents.
//!
//! ## Core Features
//!
//! - **Pluggable Backends**: storage is abstracted by the [`CatalogBackend`]
//!   trait. Out of the box it provides:
//!   - An in-memory `HashMap`-based backend (ideal for tests and demos).
//!   - A redb backend for persistent, on-disk storage (enabled via the
//!     `backend-redb` feature).
//! - **Document Semantics**: [`BookStore`] exposes find-all, find-by-id,
//!   insert-one, update-one, delete-one and delete-many. Each call touches one
//!   document atomically at the backend's own granularity, except delete-many
//!   which clears the collection in one step.
//!
//! ## Example Usage
//!
//! ```
//! use catalog::{BackendConfig, Book, BookStore};
//!
//! let store = BookStore::new(&BackendConfig::in_memory()).unwrap();
//! let book = Book::new("The Left Hand of Darkness");
//! store.insert_one(&book).unwrap();
//!
//! let found = store.find_by_id(&book.id).unwrap().unwrap();
//! assert_eq!(found.title, "The Left Hand of Darkness");
//! assert!(found.comments.is_empty());
//! ```

mod backend;
mod book;
mod store;

pub use backend::{BackendConfig, CatalogBackend, InMemoryBackend, UpdateFn};
#[cfg(feature = "backend-redb")]
pub use backend::RedbBackend;
pub use book::{Book, BookSummary};
pub use store::BookStore;

use thiserror::Error;

/// Errors raised by the storage layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Backend error: {0}")]
    Backend(String),
    #[error("Document encode error: {0}")]
    Encode(String),
    #[error("Document decode error: {0}")]
    Decode(String),
}

impl CatalogError {
    pub fn backend<E: std::fmt::Display>(err: E) -> Self {
        Self::Backend(err.to_string())
    }
}
