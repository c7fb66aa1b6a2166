//! Book catalog service

use crate::{error::AppResult, models::Book, repository::Repository};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all books in the catalog
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list_all().await
    }

    /// Get a book by ISBN
    pub async fn get_book(&self, isbn: &str) -> AppResult<Book> {
        self.repository.books.get_by_isbn(isbn).await
    }

    /// Create a new book
    pub async fn create_book(&self, book: Book) -> AppResult<Book> {
        let created = self.repository.books.create(&book).await?;
        tracing::info!("Created book isbn={}", created.isbn);
        Ok(created)
    }

    /// Update all non-key fields of the book matching `isbn`
    pub async fn update_book(&self, isbn: &str, book: Book) -> AppResult<Book> {
        let updated = self.repository.books.update(isbn, &book).await?;
        tracing::info!("Updated book isbn={}", updated.isbn);
        Ok(updated)
    }
}
