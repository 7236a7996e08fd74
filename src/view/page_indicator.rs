use super::{HEADING_FONT_SIZE, Rect, Renderable, Surface, WINDOW_PADDING};
use crate::layout::{TextMeasure, TextStyle};
use crate::library::Librarium;

/// Distance from the bottom of the contents to the label's top.
const LABEL_BOTTOM_OFFSET: f32 = 40.0;

/// `"{page} / {total}"`, right-aligned near the bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageIndicatorView {
    frame: Rect,
}

impl PageIndicatorView {
    pub fn new(frame: Rect) -> Self {
        Self { frame }
    }
}

impl Renderable for PageIndicatorView {
    fn frame(&self) -> Rect {
        self.frame
    }

    fn update(&mut self, library: &Librarium, surface: &mut dyn Surface) {
        let contents = self.frame.inset(WINDOW_PADDING);
        surface.clear(contents);

        let Some(session) = library.session() else {
            return;
        };
        let label = session.page_label();
        let style = TextStyle::default().with_font_size(HEADING_FONT_SIZE);
        let width = surface.text_width(&label, &style);
        surface.draw_text(
            &label,
            contents.right() - width,
            contents.bottom() - LABEL_BOTTOM_OFFSET,
            width,
            &style,
        );
    }
}
