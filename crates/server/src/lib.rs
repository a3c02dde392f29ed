//! Bookshelf Server - HTTP REST API for the book catalog
//!
//! Exposes the catalog operations of the `bookshelf` crate over HTTP. Every
//! documented outcome is a `200` whose JSON body is either the document or a
//! plain status string; callers tell success from failure by the body shape.
//! Storage failures are logged and answered with `500` and the string
//! `"Internal Server Error"`.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /api/books` - List books with comment counts
//! - `POST /api/books` - Create a book (`title`)
//! - `DELETE /api/books` - Delete every book
//! - `GET /api/books/{id}` - Get a book with its comments
//! - `POST /api/books/{id}` - Add a comment (`comment`)
//! - `DELETE /api/books/{id}` - Delete a book
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe (touches the store)
//!
//! Request bodies may be JSON or `application/x-www-form-urlencoded`.

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
