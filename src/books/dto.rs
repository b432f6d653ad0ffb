use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::books::domain::Book;
use crate::books::domain::model::{BookEntity, BookKind};
use crate::core::library::{BookStatus, LibraryError};

// BookDto is a data transfer object for Catalog service. It is the untyped boundary
// of the catalog: a dto only becomes a catalog entry once it converts to a BookEntity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDto {
    pub title: String,
    pub author: String,
    #[serde(default = "default_kind")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<i64>,
    #[serde(default)]
    pub book_status: BookStatus,
}

fn default_kind() -> String {
    BookKind::PLAIN.to_string()
}

impl BookDto {
    pub fn new(title: &str, author: &str) -> BookDto {
        BookDto {
            title: title.to_string(),
            author: author.to_string(),
            kind: default_kind(),
            file_size: None,
            page_count: None,
            book_status: BookStatus::Available,
        }
    }

    pub fn ebook(title: &str, author: &str, file_size: i64) -> BookDto {
        BookDto {
            kind: BookKind::EBOOK.to_string(),
            file_size: Some(file_size),
            ..BookDto::new(title, author)
        }
    }

    pub fn print_book(title: &str, author: &str, page_count: i64) -> BookDto {
        BookDto {
            kind: BookKind::PRINT_BOOK.to_string(),
            page_count: Some(page_count),
            ..BookDto::new(title, author)
        }
    }

    pub fn describe(&self) -> Result<String, LibraryError> {
        BookEntity::try_from(self).map(|b| b.describe())
    }
}

impl TryFrom<Value> for BookDto {
    type Error = LibraryError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        serde_json::from_value(value).map_err(|err| LibraryError::invalid_entity(
            format!("only books can be added to the library: {}", err).as_str()))
    }
}

impl TryFrom<&BookDto> for BookEntity {
    type Error = LibraryError;

    fn try_from(other: &BookDto) -> Result<Self, Self::Error> {
        let kind = match (other.kind.as_str(), other.file_size, other.page_count) {
            (BookKind::PLAIN, None, None) => BookKind::Plain,
            (BookKind::EBOOK, Some(file_size), None) => BookKind::EBook { file_size },
            (BookKind::PRINT_BOOK, None, Some(page_count)) => BookKind::PrintBook { page_count },
            (kind, file_size, page_count) => {
                return Err(LibraryError::invalid_entity(
                    format!("only books can be added to the library, got kind {} with file_size {:?} and page_count {:?}",
                            kind, file_size, page_count).as_str()));
            }
        };
        Ok(BookEntity {
            title: other.title.to_string(),
            author: other.author.to_string(),
            kind,
            book_status: other.book_status,
        })
    }
}

impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        let (file_size, page_count) = match other.kind {
            BookKind::Plain => (None, None),
            BookKind::EBook { file_size } => (Some(file_size), None),
            BookKind::PrintBook { page_count } => (None, Some(page_count)),
        };
        Self {
            title: other.title.to_string(),
            author: other.author.to_string(),
            kind: other.kind.name().to_string(),
            file_size,
            page_count,
            book_status: other.book_status,
        }
    }
}
