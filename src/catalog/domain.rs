pub mod service;

use async_trait::async_trait;
use crate::books::dto::BookDto;
use crate::core::library::LibraryResult;

// CatalogService owns the registered books and is the only way to change their availability.
#[async_trait]
pub trait CatalogService: Sync + Send {
    async fn add_book(&self, book: &BookDto) -> LibraryResult<BookDto>;
    async fn find_book(&self, title: &str) -> LibraryResult<BookDto>;
    async fn checkout_book(&self, title: &str) -> LibraryResult<BookDto>;
    async fn return_book(&self, title: &str) -> LibraryResult<BookDto>;
    async fn list_available(&self) -> LibraryResult<Vec<BookDto>>;
    async fn list_books(&self) -> LibraryResult<Vec<BookDto>>;
    async fn count(&self) -> LibraryResult<usize>;
}
