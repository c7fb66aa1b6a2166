//! Books repository for database operations.

use sqlx::postgres::PgDatabaseError;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::Book,
};

const BOOK_COLUMNS: &str = "isbn, amazon_url, author, language, pages, publisher, title, year";

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all books, ordered by ISBN for a stable listing.
    pub async fn list_all(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books ORDER BY isbn"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Get a single book by ISBN.
    pub async fn get_by_isbn(&self, isbn: &str) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE isbn = $1"
        ))
        .bind(isbn)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::BookNotFound(isbn.to_string()))
    }

    /// Insert a new book. A duplicate ISBN surfaces as a primary-key
    /// unique violation and maps to [`AppError::Conflict`].
    pub async fn create(&self, book: &Book) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(&format!(
            r#"
            INSERT INTO books (isbn, amazon_url, author, language, pages, publisher, title, year)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {BOOK_COLUMNS}
            "#
        ))
        .bind(&book.isbn)
        .bind(&book.amazon_url)
        .bind(&book.author)
        .bind(&book.language)
        .bind(book.pages)
        .bind(&book.publisher)
        .bind(&book.title)
        .bind(book.year)
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_violation)
    }

    /// Overwrite all non-key fields of the book matching `isbn`. The ISBN
    /// itself is the identity and is never updated.
    pub async fn update(&self, isbn: &str, book: &Book) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(&format!(
            r#"
            UPDATE books SET
                amazon_url = $1,
                author = $2,
                language = $3,
                pages = $4,
                publisher = $5,
                title = $6,
                year = $7
            WHERE isbn = $8
            RETURNING {BOOK_COLUMNS}
            "#
        ))
        .bind(&book.amazon_url)
        .bind(&book.author)
        .bind(&book.language)
        .bind(book.pages)
        .bind(&book.publisher)
        .bind(&book.title)
        .bind(book.year)
        .bind(isbn)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::BookNotFound(isbn.to_string()))
    }
}

/// Map a unique violation to a Conflict carrying the driver's message and
/// detail (e.g. `Key (isbn)=(...) already exists.`); pass everything else
/// through as a database error.
fn map_unique_violation(err: sqlx::Error) -> AppError {
    match err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            let pg = db.downcast::<PgDatabaseError>();
            AppError::Conflict {
                message: pg.message().to_string(),
                detail: pg.detail().map(str::to_string),
            }
        }
        other => AppError::Database(other),
    }
}
