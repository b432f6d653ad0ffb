use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use crate::books::domain::Book;
use crate::core::domain::Identifiable;
use crate::core::library::BookStatus;

// BookKind is the closed set of book variants with their variant-specific payload.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum BookKind {
    Plain,
    // file size in KB
    EBook { file_size: i64 },
    PrintBook { page_count: i64 },
}

impl BookKind {
    pub const PLAIN: &'static str = "Book";
    pub const EBOOK: &'static str = "EBook";
    pub const PRINT_BOOK: &'static str = "PrintBook";

    pub fn name(&self) -> &'static str {
        match self {
            BookKind::Plain => BookKind::PLAIN,
            BookKind::EBook { .. } => BookKind::EBOOK,
            BookKind::PrintBook { .. } => BookKind::PRINT_BOOK,
        }
    }
}

// BookEntity is a single catalog entry. Title, author and kind are fixed at creation,
// only the status changes and only through the catalog.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct BookEntity {
    pub title: String,
    pub author: String,
    pub kind: BookKind,
    pub book_status: BookStatus,
}

impl BookEntity {
    pub fn new(title: &str, author: &str) -> Self {
        Self::with_kind(title, author, BookKind::Plain)
    }

    pub fn ebook(title: &str, author: &str, file_size: i64) -> Self {
        Self::with_kind(title, author, BookKind::EBook { file_size })
    }

    pub fn print_book(title: &str, author: &str, page_count: i64) -> Self {
        Self::with_kind(title, author, BookKind::PrintBook { page_count })
    }

    pub fn with_kind(title: &str, author: &str, kind: BookKind) -> Self {
        Self {
            title: title.to_string(),
            author: author.to_string(),
            kind,
            book_status: BookStatus::Available,
        }
    }
}

impl Identifiable for BookEntity {
    fn id(&self) -> String {
        self.title.to_string()
    }
}

impl Book for BookEntity {
    fn title(&self) -> &str {
        self.title.as_str()
    }

    fn author(&self) -> &str {
        self.author.as_str()
    }

    fn status(&self) -> BookStatus {
        self.book_status
    }

    fn describe(&self) -> String {
        match self.kind {
            BookKind::Plain => format!("{} by {}", self.title, self.author),
            BookKind::EBook { file_size } => {
                format!("EBook: {} by {}, File Size: {}KB", self.title, self.author, file_size)
            }
            BookKind::PrintBook { page_count } => {
                format!("PrintBook: {} by {}, Page Count: {}", self.title, self.author, page_count)
            }
        }
    }
}

impl Display for BookEntity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}
