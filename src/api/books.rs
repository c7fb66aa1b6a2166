//! Book catalog endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::Book,
    schema,
};

/// Response wrapper for the book collection
#[derive(Serialize, ToSchema)]
pub struct BooksResponse {
    pub books: Vec<Book>,
}

/// Response wrapper for a single book
#[derive(Serialize, ToSchema)]
pub struct BookResponse {
    pub book: Book,
}

/// Validate the raw request body against the book schema, then
/// deserialize it. Validation runs first so a malformed payload is
/// rejected with the full violation list before the store is touched.
fn parse_book(payload: &Value) -> AppResult<Book> {
    let violations = schema::validate(payload);
    if !violations.is_empty() {
        return Err(AppError::Validation(violations));
    }

    serde_json::from_value(payload.clone())
        .map_err(|e| AppError::Internal(format!("Failed to deserialize validated payload: {e}")))
}

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books in the catalog", body = BooksResponse)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
) -> AppResult<Json<BooksResponse>> {
    let books = state.services.books.list_books().await?;
    Ok(Json(BooksResponse { books }))
}

/// Get a book by ISBN
#[utoipa::path(
    get,
    path = "/books/{isbn}",
    tag = "books",
    params(
        ("isbn" = String, Path, description = "Book ISBN")
    ),
    responses(
        (status = 200, description = "The matching book", body = BookResponse),
        (status = 404, description = "No book with this ISBN", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(isbn): Path<String>,
) -> AppResult<Json<BookResponse>> {
    let book = state.services.books.get_book(&isbn).await?;
    Ok(Json(BookResponse { book }))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = Book,
    responses(
        (status = 200, description = "Book created", body = BookResponse),
        (status = 400, description = "Invalid payload or duplicate ISBN", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Json(payload): Json<Value>,
) -> AppResult<Json<BookResponse>> {
    let book = parse_book(&payload)?;
    let created = state.services.books.create_book(book).await?;
    Ok(Json(BookResponse { book: created }))
}

/// Update an existing book
#[utoipa::path(
    put,
    path = "/books/{isbn}",
    tag = "books",
    params(
        ("isbn" = String, Path, description = "Book ISBN")
    ),
    request_body = Book,
    responses(
        (status = 200, description = "Book updated", body = BookResponse),
        (status = 400, description = "Invalid payload", body = crate::error::ErrorResponse),
        (status = 404, description = "No book with this ISBN", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(isbn): Path<String>,
    Json(payload): Json<Value>,
) -> AppResult<Json<BookResponse>> {
    // The path parameter is the identity; the body's isbn field is
    // validated like any other field but never written.
    let book = parse_book(&payload)?;
    let updated = state.services.books.update_book(&isbn, book).await?;
    Ok(Json(BookResponse { book: updated }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_collection_serializes_to_empty_books_array() {
        let body = serde_json::to_value(BooksResponse { books: vec![] }).unwrap();
        assert_eq!(body, json!({ "books": [] }));
    }

    #[test]
    fn single_book_serializes_under_book_key() {
        let book = Book {
            isbn: "0691161518".to_string(),
            amazon_url: "http://a.co/eobPtX2".to_string(),
            author: "Matthew Lane".to_string(),
            language: "english".to_string(),
            pages: 264,
            publisher: "Princeton University Press".to_string(),
            title: "Power-Up: Unlocking Hidden Math in Video Games".to_string(),
            year: 2017,
        };

        let body = serde_json::to_value(BookResponse { book }).unwrap();
        assert_eq!(body["book"]["isbn"], json!("0691161518"));
        assert_eq!(body["book"]["pages"], json!(264));
    }

    #[test]
    fn parse_book_surfaces_violations() {
        let payload = json!({
            "isbn": "0691161518",
            "amazon_url": "http://a.co/eobPtX2",
            "author": "Matthew Lane",
            "language": "english",
            "pages": "264",
            "publisher": "Princeton University Press",
            "title": "Power-Up: Unlocking Hidden Math in Video Games",
            "year": 2017
        });

        let err = parse_book(&payload).unwrap_err();
        match err {
            AppError::Validation(violations) => {
                assert_eq!(violations, vec!["instance.pages is not of a type(s) integer"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
