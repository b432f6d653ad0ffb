pub mod memory_book_repository;

use async_trait::async_trait;
use crate::books::domain::model::BookEntity;
use crate::core::library::{BookStatus, LibraryResult};
use crate::core::repository::Repository;


#[async_trait]
pub trait BookRepository: Repository<BookEntity> {
    // moves the first entry with the title that is in `from` state into `to` state,
    // as a single step that no other caller can interleave with.
    async fn transition(&self, title: &str, from: BookStatus, to: BookStatus) -> LibraryResult<BookEntity>;

    // moves an entry equal to `book` into `to` state, undoing a transition that returned `book`.
    async fn revert(&self, book: &BookEntity, to: BookStatus) -> LibraryResult<BookEntity>;
}
