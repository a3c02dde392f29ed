use crate::error::ServerResult;
use crate::extract::Payload;
use crate::state::ServerState;
use axum::extract::{Path, State};
use axum::Json;
use bookshelf::{Book, BookSummary, Notice, Outcome};
use serde::Deserialize;
use std::sync::Arc;

/// Body of `POST /api/books`
#[derive(Debug, Default, Deserialize)]
pub struct NewBookRequest {
    #[serde(default)]
    pub title: Option<String>,
}

/// Body of `POST /api/books/{id}`
#[derive(Debug, Default, Deserialize)]
pub struct NewCommentRequest {
    #[serde(default)]
    pub comment: Option<String>,
}

/// List every book as `{_id, title, commentcount}`
pub async fn list_books(
    State(state): State<Arc<ServerState>>,
) -> ServerResult<Json<Vec<BookSummary>>> {
    Ok(Json(state.catalog.list().await?))
}

/// Create a book from its title
///
/// Returns the stored book, or the string `"missing required field title"`.
pub async fn create_book(
    State(state): State<Arc<ServerState>>,
    Payload(request): Payload<NewBookRequest>,
) -> ServerResult<Json<Outcome<Book>>> {
    Ok(Json(state.catalog.create(request.title).await?))
}

/// Delete every book
pub async fn delete_all_books(
    State(state): State<Arc<ServerState>>,
) -> ServerResult<Json<Notice>> {
    Ok(Json(state.catalog.delete_all().await?))
}

/// Fetch one book with its full comment list
pub async fn get_book(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> ServerResult<Json<Outcome<Book>>> {
    Ok(Json(state.catalog.get(&id).await?))
}

/// Append a comment to a book
pub async fn add_comment(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
    Payload(request): Payload<NewCommentRequest>,
) -> ServerResult<Json<Outcome<Book>>> {
    Ok(Json(state.catalog.add_comment(&id, request.comment).await?))
}

/// Delete one book
pub async fn delete_book(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> ServerResult<Json<Notice>> {
    Ok(Json(state.catalog.delete(&id).await?))
}
