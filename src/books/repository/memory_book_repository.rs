use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::domain::Identifiable;
use crate::core::library::{BookStatus, LibraryError, LibraryResult, PaginatedResult};
use crate::core::repository::Repository;

// MemoryBookRepository keeps the catalog entries in insertion order behind one lock.
// Lookups are linear scans and the first match wins.
#[derive(Debug, Default)]
pub struct MemoryBookRepository {
    books: RwLock<Vec<BookEntity>>,
}

impl MemoryBookRepository {
    pub fn new() -> Self {
        Self {
            books: RwLock::new(vec![]),
        }
    }
}

// BookFilter is the parsed form of a query predicate
#[derive(Debug, Default)]
struct BookFilter {
    title: Option<String>,
    author: Option<String>,
    kind: Option<String>,
    status: Option<BookStatus>,
}

impl BookFilter {
    fn parse(predicate: &HashMap<String, String>) -> LibraryResult<Self> {
        let mut filter = BookFilter::default();
        for (k, v) in predicate {
            match k.as_str() {
                "title" => filter.title = Some(v.to_string()),
                "author" => filter.author = Some(v.to_string()),
                "kind" => filter.kind = Some(v.to_string()),
                "book_status" => filter.status = Some(BookStatus::try_from(v.as_str())?),
                _ => {
                    return Err(LibraryError::validation(
                        format!("unsupported book predicate {}", k).as_str(), Some("400".to_string())));
                }
            }
        }
        Ok(filter)
    }

    fn matches(&self, book: &BookEntity) -> bool {
        self.title.as_ref().map_or(true, |t| *t == book.title) &&
            self.author.as_ref().map_or(true, |a| *a == book.author) &&
            self.kind.as_ref().map_or(true, |k| k.as_str() == book.kind.name()) &&
            self.status.map_or(true, |s| s == book.book_status)
    }
}

fn parse_page(page: Option<&str>) -> LibraryResult<usize> {
    match page {
        None => Ok(0),
        Some(token) => token.parse::<usize>().map_err(|err| LibraryError::validation(
            format!("invalid page token {} {}", token, err).as_str(), Some("400".to_string()))),
    }
}

#[async_trait]
impl Repository<BookEntity> for MemoryBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<usize> {
        let mut books = self.books.write()?;
        books.push(entity.clone());
        tracing::debug!(title = entity.title.as_str(), size = books.len(), "stored book");
        Ok(1)
    }

    async fn get(&self, id: &str) -> LibraryResult<BookEntity> {
        let books = self.books.read()?;
        books.iter()
            .find(|b| b.id() == id)
            .cloned()
            .ok_or_else(|| LibraryError::not_found(format!("book not found for {}", id).as_str()))
    }

    async fn delete(&self, entity: &BookEntity) -> LibraryResult<usize> {
        let mut books = self.books.write()?;
        match books.iter().rposition(|b| b == entity) {
            Some(pos) => {
                let _ = books.remove(pos);
                tracing::debug!(title = entity.title.as_str(), size = books.len(), "removed book");
                Ok(1)
            }
            None => Err(LibraryError::not_found(format!("book not found for {}", entity.id()).as_str())),
        }
    }

    async fn count(&self) -> LibraryResult<usize> {
        Ok(self.books.read()?.len())
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<BookEntity>> {
        let filter = BookFilter::parse(predicate)?;
        let offset = parse_page(page)?;
        let page_size = page_size.max(1);
        let books = self.books.read()?;
        let matched: Vec<&BookEntity> = books.iter().filter(|b| filter.matches(b)).collect();
        let records: Vec<BookEntity> = matched.iter().skip(offset).take(page_size).map(|b| (*b).clone()).collect();
        let end = offset.saturating_add(page_size);
        let next_page = if end < matched.len() { Some(end.to_string()) } else { None };
        Ok(PaginatedResult::new(page_size, next_page, records))
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepository {
    async fn transition(&self, title: &str, from: BookStatus, to: BookStatus) -> LibraryResult<BookEntity> {
        let mut books = self.books.write()?;
        if let Some(book) = books.iter_mut().find(|b| b.id() == title && b.book_status == from) {
            book.book_status = to;
            return Ok(book.clone());
        }
        if books.iter().any(|b| b.id() == title) {
            Err(LibraryError::unavailable(
                format!("no copy of {} is {}", title, from).as_str(), Some("409".to_string()), false))
        } else {
            Err(LibraryError::not_found(format!("book not found for {}", title).as_str()))
        }
    }

    async fn revert(&self, book: &BookEntity, to: BookStatus) -> LibraryResult<BookEntity> {
        let mut books = self.books.write()?;
        match books.iter_mut().find(|b| **b == *book) {
            Some(found) => {
                found.book_status = to;
                Ok(found.clone())
            }
            None => Err(LibraryError::not_found(format!("book not found for {}", book.id()).as_str())),
        }
    }
}
