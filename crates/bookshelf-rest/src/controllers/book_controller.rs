//! Book resource controller.

use crate::{
    extractors::{decode_book_request, BookBody, BookPath, PaginationQuery},
    responses::{created, ok, ApiResult, AppError, MessageResponse},
    state::AppState,
};
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use bookshelf_core::Book;
use tracing::debug;

/// Creates the book router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route("/:id", get(get_book).put(update_book).delete(delete_book))
}

/// List a page of books.
async fn list_books(State(state): State<AppState>, pagination: PaginationQuery) -> ApiResult<Vec<Book>> {
    debug!("List books request");

    let books = state.book_service.list_books(pagination.into()).await?;
    ok(books)
}

/// Create a new book.
async fn create_book(
    State(state): State<AppState>,
    BookBody(body): BookBody,
) -> Result<(StatusCode, Json<Book>), AppError> {
    let request = decode_book_request(&body)?;
    debug!("Create book request: {}", request.title);

    let book = state.book_service.create_book(request).await?;
    Ok(created(book))
}

/// Get a book by ID.
async fn get_book(State(state): State<AppState>, BookPath(id): BookPath) -> ApiResult<Book> {
    debug!("Get book request: {}", id);

    let book = state.book_service.get_book(id).await?;
    ok(book)
}

/// Replace a book's title, author and year.
///
/// The body is decoded here but inspected by the service only after the
/// book is found.
async fn update_book(
    State(state): State<AppState>,
    BookPath(id): BookPath,
    BookBody(body): BookBody,
) -> ApiResult<Book> {
    debug!("Update book request: {}", id);

    let book = state.book_service.update_book(id, decode_book_request(&body)).await?;
    ok(book)
}

/// Delete a book.
async fn delete_book(State(state): State<AppState>, BookPath(id): BookPath) -> ApiResult<MessageResponse> {
    debug!("Delete book request: {}", id);

    state.book_service.delete_book(id).await?;
    ok(MessageResponse::new("Book deleted successfully"))
}
