use super::{Rect, Renderable, Surface, WINDOW_PADDING};
use crate::layout::TextStyle;
use crate::library::Librarium;

/// Every catalog title, one per row, with a selection cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BookListView {
    frame: Rect,
    selected: usize,
    count: usize,
}

impl BookListView {
    pub fn new(frame: Rect) -> Self {
        Self {
            frame,
            selected: 0,
            count: 0,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select_next(&mut self) -> bool {
        if self.selected + 1 < self.count {
            self.selected += 1;
            true
        } else {
            false
        }
    }

    pub fn select_prev(&mut self) -> bool {
        if self.selected > 0 {
            self.selected -= 1;
            true
        } else {
            false
        }
    }

    /// First row shown, scrolled so the selection stays visible.
    fn top_row(&self, visible_rows: usize) -> usize {
        (self.selected + 1).saturating_sub(visible_rows)
    }
}

impl Renderable for BookListView {
    fn frame(&self) -> Rect {
        self.frame
    }

    /// Start on the open book, or on the first title.
    fn create(&mut self, library: &Librarium) {
        let catalog = library.catalog();
        self.count = catalog.len();
        self.selected = library
            .session()
            .and_then(|session| catalog.position(session.book()))
            .unwrap_or(0);
    }

    fn update(&mut self, library: &Librarium, surface: &mut dyn Surface) {
        let contents = self.frame.inset(WINDOW_PADDING);
        surface.clear(contents);

        let row_height = library.settings().line_height;
        let visible_rows = ((contents.height / row_height).floor() as usize).max(1);
        let top = self.top_row(visible_rows);
        let style = TextStyle::default();

        for (row, (index, title)) in library
            .catalog()
            .titles()
            .enumerate()
            .skip(top)
            .take(visible_rows)
            .enumerate()
        {
            let y = contents.y + row as f32 * row_height;
            if index == self.selected {
                surface.draw_cursor(Rect::new(contents.x, y, contents.width, row_height));
            }
            surface.draw_text(title, contents.x, y, contents.width, &style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_clamps() {
        let mut list = BookListView::new(Rect::new(0.0, 0.0, 150.0, 624.0));
        list.count = 2;
        assert!(!list.select_prev());
        assert!(list.select_next());
        assert!(!list.select_next());
        assert_eq!(list.selected(), 1);
    }

    #[test]
    fn test_top_row_follows_selection() {
        let mut list = BookListView::new(Rect::default());
        list.count = 10;
        assert_eq!(list.top_row(3), 0);
        for _ in 0..5 {
            list.select_next();
        }
        assert_eq!(list.top_row(3), 3);
    }
}
