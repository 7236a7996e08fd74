//! Reading session tests.
//!
//! Tests for opening books through the library and paging through them.

use librarium::{Book, Catalog, Error, Librarium};
use proptest::prelude::*;

fn library() -> Librarium {
    Librarium::new(Catalog::load("tests/fixtures/Librarium.json").unwrap())
}

// ============================================================================
// Reading Scenario Tests
// ============================================================================

#[test]
fn test_read_lilia_front_to_back() {
    let mut library = library();

    library.open_reading("lilia").unwrap();
    assert_eq!(library.current_page_number().unwrap(), 1);
    assert_eq!(library.total_pages().unwrap(), 2);
    assert_eq!(library.current_page_text().unwrap(), "A short tale ");

    assert!(library.next_page().unwrap());
    assert_eq!(library.current_page_text().unwrap(), "of wrapping.");

    assert!(!library.next_page().unwrap());
    assert_eq!(library.current_page_number().unwrap(), 2);

    assert!(library.prev_page().unwrap());
    assert!(!library.prev_page().unwrap());
    assert_eq!(library.current_page_number().unwrap(), 1);
}

#[test]
fn test_open_unknown_title() {
    let mut library = library();

    match library.open_reading("Dragon") {
        Err(Error::BookNotFound(query)) => assert_eq!(query, "Dragon"),
        other => panic!("expected BookNotFound, got {other:?}"),
    }
    assert!(matches!(library.current_page_number(), Err(Error::NoBookSelected)));
}

#[test]
fn test_reopening_restarts_on_first_page() {
    let mut library = library();

    library.open_reading("marsh").unwrap();
    library.go_to_page(3).unwrap();
    assert_eq!(library.current_page_number().unwrap(), 3);

    library.open_reading("marsh").unwrap();
    assert_eq!(library.current_page_number().unwrap(), 1);
}

#[test]
fn test_open_empty_book() {
    let mut library = library();

    library.open_reading("ledger").unwrap();
    assert_eq!(library.total_pages().unwrap(), 0);
    assert_eq!(library.current_page_number().unwrap(), 1);
    assert!(!library.next_page().unwrap());
    assert!(matches!(library.current_page_text(), Err(Error::EmptyBook(_))));

    let measure = |text: &str| text.len() as f32;
    assert!(library.get_current_page_layout(&measure, 100.0, 100.0).is_err());
}

#[test]
fn test_session_after_close() {
    let mut library = library();

    library.open_reading("lilia").unwrap();
    library.next_page().unwrap();
    let session = library.close_reading().unwrap();

    assert_eq!(session.page_number(), 2);
    assert_eq!(session.full_contents(), "A short tale of wrapping.");
    assert!(matches!(library.prev_page(), Err(Error::NoBookSelected)));
}

#[test]
fn test_contents_do_not_need_open_book() {
    let library = library();
    assert_eq!(
        library.get_book_contents("Lilia").unwrap(),
        "A short tale of wrapping."
    );
}

// ============================================================================
// Pagination Properties
// ============================================================================

#[derive(Debug, Clone, Copy)]
enum Turn {
    Next,
    Prev,
    Jump(usize),
}

fn turn() -> impl Strategy<Value = Turn> {
    prop_oneof![
        Just(Turn::Next),
        Just(Turn::Prev),
        (0usize..20).prop_map(Turn::Jump),
    ]
}

fn book_with(pages: usize) -> Book {
    (1..=pages).fold(Book::new("Generated"), |book, n| {
        book.with_page(format!("Page {n}."))
    })
}

proptest! {
    #[test]
    fn prop_page_number_stays_in_range(
        pages in 1usize..12,
        turns in prop::collection::vec(turn(), 0..40),
    ) {
        let mut library = Librarium::new(Catalog::new(vec![book_with(pages)]));
        library.open_reading("generated").unwrap();

        for turn in turns {
            let before = library.current_page_number().unwrap();
            match turn {
                Turn::Next => {
                    let moved = library.next_page().unwrap();
                    prop_assert_eq!(moved, before < pages);
                }
                Turn::Prev => {
                    let moved = library.prev_page().unwrap();
                    prop_assert_eq!(moved, before > 1);
                }
                Turn::Jump(target) => {
                    library.go_to_page(target).unwrap();
                }
            }

            let page = library.current_page_number().unwrap();
            prop_assert!((1..=pages).contains(&page));
            let expected = format!("Page {page}.");
            prop_assert_eq!(library.current_page_text().unwrap(), expected.as_str());
        }
    }

    #[test]
    fn prop_excess_next_pages_stop_on_last(pages in 1usize..12) {
        let mut library = Librarium::new(Catalog::new(vec![book_with(pages)]));
        library.open_reading("generated").unwrap();

        for _ in 0..pages + 5 {
            library.next_page().unwrap();
        }
        prop_assert_eq!(library.current_page_number().unwrap(), pages);

        for _ in 0..pages + 5 {
            library.prev_page().unwrap();
        }
        prop_assert_eq!(library.current_page_number().unwrap(), 1);
    }
}
