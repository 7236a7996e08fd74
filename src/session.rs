//! The reader's position in the open book.

use log::debug;

use crate::book::{Book, Catalog};
use crate::error::{Error, Result};

/// Tracks the open book and the page being read.
///
/// The page number is 1-based and always stays within
/// `1..=total_pages()`; navigation past either end is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingSession {
    book: Book,
    page_number: usize,
}

impl ReadingSession {
    /// Open a session on the first page of `book`.
    pub fn new(book: Book) -> Self {
        debug!(
            "opened \"{}\" ({} pages)",
            book.title,
            book.page_count()
        );
        Self {
            book,
            page_number: 1,
        }
    }

    /// Resolve `query` against the catalog and open the matching book.
    pub fn open(catalog: &Catalog, query: &str) -> Result<Self> {
        catalog.get_book(query).cloned().map(Self::new)
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    pub fn title(&self) -> &str {
        &self.book.title
    }

    pub fn page_number(&self) -> usize {
        self.page_number
    }

    pub fn total_pages(&self) -> usize {
        self.book.page_count()
    }

    /// Raw text of the current page, escape codes included.
    pub fn current_page_text(&self) -> Result<&str> {
        self.book
            .page(self.page_number)
            .map(|page| page.text.as_str())
            .ok_or_else(|| Error::EmptyBook(self.book.title.clone()))
    }

    /// Move forward one page. Returns false on the last page.
    pub fn next_page(&mut self) -> bool {
        if self.page_number < self.total_pages() {
            self.page_number += 1;
            debug!("\"{}\": page {}", self.book.title, self.page_number);
            true
        } else {
            false
        }
    }

    /// Move back one page. Returns false on the first page.
    pub fn prev_page(&mut self) -> bool {
        if self.page_number > 1 {
            self.page_number -= 1;
            debug!("\"{}\": page {}", self.book.title, self.page_number);
            true
        } else {
            false
        }
    }

    /// Jump to `number`, clamped into the book's page range.
    pub fn go_to_page(&mut self, number: usize) -> bool {
        let target = number.clamp(1, self.total_pages().max(1));
        let changed = target != self.page_number;
        self.page_number = target;
        changed
    }

    pub fn is_first_page(&self) -> bool {
        self.page_number == 1
    }

    pub fn is_last_page(&self) -> bool {
        self.page_number >= self.total_pages()
    }

    /// Every page of the open book joined in order.
    pub fn full_contents(&self) -> String {
        self.book.contents()
    }

    /// `"{page} / {total}"`, as shown by the page indicator.
    pub fn page_label(&self) -> String {
        format!("{} / {}", self.page_number, self.total_pages())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lilia() -> Book {
        Book::new("Lilia")
            .with_page("A short tale ")
            .with_page("of wrapping.")
    }

    #[test]
    fn test_starts_on_first_page() {
        let session = ReadingSession::new(lilia());
        assert_eq!(session.page_number(), 1);
        assert_eq!(session.total_pages(), 2);
        assert_eq!(session.current_page_text().unwrap(), "A short tale ");
    }

    #[test]
    fn test_next_page_clamps_at_end() {
        let mut session = ReadingSession::new(lilia());
        assert!(session.next_page());
        assert!(!session.next_page());
        assert_eq!(session.page_number(), 2);
        assert_eq!(session.current_page_text().unwrap(), "of wrapping.");
    }

    #[test]
    fn test_prev_page_clamps_at_start() {
        let mut session = ReadingSession::new(lilia());
        assert!(!session.prev_page());
        assert_eq!(session.page_number(), 1);
    }

    #[test]
    fn test_go_to_page_clamps() {
        let mut session = ReadingSession::new(lilia());
        assert!(session.go_to_page(99));
        assert_eq!(session.page_number(), 2);
        assert!(session.go_to_page(0));
        assert_eq!(session.page_number(), 1);
        assert!(!session.go_to_page(1));
    }

    #[test]
    fn test_empty_book_has_no_current_page() {
        let mut session = ReadingSession::new(Book::new("Blank"));
        assert_eq!(session.total_pages(), 0);
        assert_eq!(session.page_number(), 1);
        assert!(!session.next_page());
        assert!(matches!(session.current_page_text(), Err(Error::EmptyBook(_))));
    }

    #[test]
    fn test_page_label() {
        let mut session = ReadingSession::new(lilia());
        session.next_page();
        assert_eq!(session.page_label(), "2 / 2");
    }
}
