//! HTTP handlers for the `/books` resource.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use bookshelf_http::{AppError, JsonBody};

use super::models::{Book, BookRequest};
use super::store::BookStore;

pub type SharedStore = Arc<dyn BookStore>;

fn book_not_found(raw_id: &str) -> AppError {
    AppError::not_found(format!("book with id {} not found", raw_id))
}

/// An id that is not a 32-bit integer cannot name a stored book.
fn parse_book_id(raw_id: &str) -> Result<i32, AppError> {
    raw_id.parse().map_err(|_| book_not_found(raw_id))
}

/// `POST /books`
pub async fn create_book(
    State(store): State<SharedStore>,
    JsonBody(request): JsonBody<BookRequest>,
) -> Result<(StatusCode, Json<&'static str>), AppError> {
    let id = store.create(&request).await?;
    tracing::info!(book_id = id, "book created");
    Ok((StatusCode::CREATED, Json("Created")))
}

/// `PUT /books/{bookID}`
pub async fn update_book(
    State(store): State<SharedStore>,
    Path(raw_id): Path<String>,
    JsonBody(request): JsonBody<BookRequest>,
) -> Result<Json<&'static str>, AppError> {
    let id = parse_book_id(&raw_id)?;
    if store.update(id, &request).await? == 0 {
        return Err(book_not_found(&raw_id));
    }
    tracing::info!(book_id = id, "book updated");
    Ok(Json("Updated"))
}

/// `GET /books/{bookID}`
pub async fn get_book(
    State(store): State<SharedStore>,
    Path(raw_id): Path<String>,
) -> Result<Json<Book>, AppError> {
    let id = parse_book_id(&raw_id)?;
    store
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| book_not_found(&raw_id))
}

/// `GET /books`
pub async fn list_books(State(store): State<SharedStore>) -> Result<Json<Vec<Book>>, AppError> {
    let books = store.list().await?;
    tracing::debug!(count = books.len(), "books listed");
    Ok(Json(books))
}

/// `DELETE /books/{bookID}`
pub async fn delete_book(
    State(store): State<SharedStore>,
    Path(raw_id): Path<String>,
) -> Result<Json<&'static str>, AppError> {
    let id = parse_book_id(&raw_id)?;
    if store.delete(id).await? == 0 {
        return Err(book_not_found(&raw_id));
    }
    tracing::info!(book_id = id, "book deleted");
    Ok(Json("Deleted"))
}
