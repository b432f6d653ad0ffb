use crate::books::dto::BookDto;
use crate::core::domain::Configuration;
use crate::core::library::LibraryResult;

// Renders a header followed by one summary line per book, or only the empty message.
pub fn render_listing(header: &str, empty_message: &str, books: &[BookDto]) -> LibraryResult<Vec<String>> {
    if books.is_empty() {
        return Ok(vec![empty_message.to_string()]);
    }
    let mut lines = Vec::with_capacity(books.len() + 1);
    lines.push(header.to_string());
    for book in books {
        lines.push(book.describe()?);
    }
    Ok(lines)
}

pub fn render_available(config: &Configuration, books: &[BookDto]) -> LibraryResult<Vec<String>> {
    render_listing(config.available_header.as_str(), config.available_empty_message.as_str(), books)
}

pub fn render_catalog(config: &Configuration, books: &[BookDto]) -> LibraryResult<Vec<String>> {
    render_listing(config.catalog_header.as_str(), config.catalog_empty_message.as_str(), books)
}
