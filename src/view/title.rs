use super::{HEADING_FONT_SIZE, Rect, Renderable, Surface, WINDOW_PADDING};
use crate::layout::{TextMeasure, TextStyle};
use crate::library::Librarium;

/// The open book's title, centered.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleView {
    frame: Rect,
    title: Option<String>,
}

impl TitleView {
    pub fn new(frame: Rect) -> Self {
        Self { frame, title: None }
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

impl Renderable for TitleView {
    fn frame(&self) -> Rect {
        self.frame
    }

    fn create(&mut self, library: &Librarium) {
        self.title = library.session().map(|session| session.title().to_string());
    }

    fn update(&mut self, _library: &Librarium, surface: &mut dyn Surface) {
        let contents = self.frame.inset(WINDOW_PADDING);
        surface.clear(contents);

        let Some(title) = &self.title else {
            return;
        };
        let style = TextStyle::default().with_font_size(HEADING_FONT_SIZE);
        let width = surface.text_width(title, &style);
        let x = contents.x + contents.width / 2.0 - width / 2.0;
        surface.draw_text(title, x, contents.y, contents.width, &style);
    }

    fn dispose(&mut self) {
        self.title = None;
    }
}
