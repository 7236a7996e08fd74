//! Books and the catalog they are loaded into.
//!
//! A catalog document is a JSON array of books:
//!
//! ```json
//! [
//!   { "title": "Lilia", "pages": [ { "pageText": "A short tale " }, { "pageText": "of wrapping." } ] }
//! ]
//! ```

use std::collections::HashSet;
use std::fs;
use std::io::Read;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A titled, ordered sequence of pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub pages: Vec<Page>,
}

/// One unit of text shown at a time. The text may carry escape codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    #[serde(rename = "pageText")]
    pub text: String,
}

impl Book {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            pages: Vec::new(),
        }
    }

    pub fn with_page(mut self, text: impl Into<String>) -> Self {
        self.pages.push(Page::new(text));
        self
    }

    /// Get a page by its 1-based number.
    pub fn page(&self, number: usize) -> Option<&Page> {
        number.checked_sub(1).and_then(|index| self.pages.get(index))
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Every page's raw text joined in order, with no separator.
    pub fn contents(&self) -> String {
        self.pages.iter().map(|page| page.text.as_str()).collect()
    }

    fn title_contains(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower)
    }
}

impl Page {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// The read-only collection of books available to the reader.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    pub fn new(books: Vec<Book>) -> Self {
        warn_on_ambiguous_titles(&books);
        Self { books }
    }

    /// Load a catalog document from disk.
    ///
    /// A missing or unreadable file is [`Error::DataLoad`]; a document that
    /// does not match the catalog schema is [`Error::Malformed`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| Error::DataLoad {
            path: path.to_path_buf(),
            source,
        })?;

        let books = serde_json::from_str(&data).map_err(|source| Error::Malformed {
            origin: path.display().to_string(),
            source,
        })?;

        let catalog = Self::new(books);
        info!("loaded {} books from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Read a catalog document from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let books = serde_json::from_reader(reader).map_err(|source| Error::Malformed {
            origin: "<reader>".to_string(),
            source,
        })?;
        Ok(Self::new(books))
    }

    /// Parse a catalog document held in memory.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let books = serde_json::from_str(json).map_err(|source| Error::Malformed {
            origin: "<string>".to_string(),
            source,
        })?;
        Ok(Self::new(books))
    }

    /// Find a book whose title contains `query`, ignoring case.
    ///
    /// The whole catalog is scanned and the *last* matching book wins, so a
    /// query that matches several titles resolves to the one listed latest.
    pub fn find_by_title(&self, query: &str) -> Option<&Book> {
        let needle = query.to_lowercase();
        self.books
            .iter()
            .filter(|book| book.title_contains(&needle))
            .last()
    }

    /// Like [`find_by_title`](Self::find_by_title), failing with
    /// [`Error::BookNotFound`] when nothing matches.
    pub fn get_book(&self, query: &str) -> Result<&Book> {
        self.find_by_title(query)
            .ok_or_else(|| Error::BookNotFound(query.to_string()))
    }

    /// Concatenated contents of the book matching `query`.
    pub fn book_contents(&self, query: &str) -> Result<String> {
        self.get_book(query).map(Book::contents)
    }

    pub fn get(&self, index: usize) -> Option<&Book> {
        self.books.get(index)
    }

    /// Position of a book in catalog order, compared by title and pages.
    pub fn position(&self, book: &Book) -> Option<usize> {
        self.books.iter().position(|candidate| candidate == book)
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.books.iter().map(|book| book.title.as_str())
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

fn warn_on_ambiguous_titles(books: &[Book]) {
    let mut seen = HashSet::new();
    for book in books {
        if !seen.insert(book.title.to_lowercase()) {
            warn!(
                "duplicate book title \"{}\"; lookups resolve to the last one",
                book.title
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Book::new("Lilia").with_page("A short tale ").with_page("of wrapping."),
            Book::new("The Lost Sword").with_page("It was lost."),
            Book::new("Sword Lore").with_page("Forged in fire."),
        ])
    }

    #[test]
    fn test_find_by_title_ignores_case() {
        let catalog = catalog();
        let upper = catalog.find_by_title("LILIA").unwrap();
        let lower = catalog.find_by_title("lilia").unwrap();
        assert_eq!(upper, lower);
        assert_eq!(upper.title, "Lilia");
    }

    #[test]
    fn test_find_by_title_matches_substring() {
        let catalog = catalog();
        assert_eq!(catalog.find_by_title("lost").unwrap().title, "The Lost Sword");
    }

    #[test]
    fn test_find_by_title_last_match_wins() {
        let catalog = catalog();
        assert_eq!(catalog.find_by_title("sword").unwrap().title, "Sword Lore");
    }

    #[test]
    fn test_find_by_title_treats_query_literally() {
        let catalog = catalog();
        assert!(catalog.find_by_title("l.lia").is_none());
    }

    #[test]
    fn test_get_book_not_found() {
        let err = catalog().get_book("nonexistent").unwrap_err();
        assert!(matches!(err, Error::BookNotFound(ref q) if q == "nonexistent"));
    }

    #[test]
    fn test_contents_join_without_separator() {
        let book = Book::new("Once").with_page("Once ").with_page("upon a time.");
        assert_eq!(book.contents(), "Once upon a time.");
    }

    #[test]
    fn test_page_is_one_based() {
        let book = Book::new("Lilia").with_page("first").with_page("second");
        assert!(book.page(0).is_none());
        assert_eq!(book.page(1).unwrap().text, "first");
        assert_eq!(book.page(2).unwrap().text, "second");
        assert!(book.page(3).is_none());
    }

    #[test]
    fn test_from_json_str_reads_page_text() {
        let catalog = Catalog::from_json_str(
            r#"[{"title": "Lilia", "pages": [{"pageText": "Hello "}, {"pageText": "world"}]}]"#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.book_contents("lil").unwrap(), "Hello world");
    }

    #[test]
    fn test_from_json_str_rejects_schema_mismatch() {
        let err = Catalog::from_json_str(r#"[{"title": "Lilia", "pages": [{"text": "x"}]}]"#)
            .unwrap_err();
        assert!(matches!(err, Error::Malformed { .. }));
    }
}
