//! API route handlers
//!
//! - `books`: the catalog endpoints under `/api/books`
//! - `health`: liveness and readiness probes

pub mod books;
pub mod health;

use crate::error::ServerError;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// API version and base info
///
/// Returns server information including version and available endpoints.
///
/// # Response
///
/// ```json
/// {
///   "name": "Bookshelf Server",
///   "version": "0.1.0",
///   "endpoints": ["..."]
/// }
/// ```
pub async fn api_info() -> impl IntoResponse {
    Json(json!({
        "name": "Bookshelf Server",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "GET /api/books",
            "POST /api/books",
            "DELETE /api/books",
            "GET /api/books/{id}",
            "POST /api/books/{id}",
            "DELETE /api/books/{id}",
            "GET /health",
            "GET /ready"
        ]
    }))
}

/// 404 Not Found handler
///
/// Returns a standardized error response for undefined routes.
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
