use log::debug;

use super::{Rect, Renderable, Surface, WINDOW_PADDING};
use crate::layout::{FlowArea, Point, TextLayout, TokenKind};
use crate::library::Librarium;

/// Gap between the top of the contents and the first line.
const TOP_MARGIN: f32 = 12.0;

/// The current page, word-wrapped to the view's width.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentView {
    frame: Rect,
    layout: Option<TextLayout>,
}

impl ContentView {
    pub fn new(frame: Rect) -> Self {
        Self {
            frame,
            layout: None,
        }
    }

    /// The layout drawn by the last update.
    pub fn layout(&self) -> Option<&TextLayout> {
        self.layout.as_ref()
    }

    /// The box page text flows into.
    pub fn flow_area(&self, line_height: f32) -> FlowArea {
        let contents = self.frame.inset(WINDOW_PADDING);
        FlowArea::new(
            Point::new(contents.x, contents.y + TOP_MARGIN),
            contents.width,
            (contents.height - TOP_MARGIN).max(0.0),
            line_height,
        )
    }
}

impl Renderable for ContentView {
    fn frame(&self) -> Rect {
        self.frame
    }

    fn create(&mut self, _library: &Librarium) {
        self.layout = None;
    }

    fn update(&mut self, library: &Librarium, surface: &mut dyn Surface) {
        surface.clear(self.frame.inset(WINDOW_PADDING));

        let text = match library.current_page_text() {
            Ok(text) => text,
            Err(err) => {
                debug!("nothing to draw: {err}");
                self.layout = None;
                return;
            }
        };

        let area = self.flow_area(library.settings().line_height);
        let layout = library.engine().layout(text, &*surface, &area);
        for token in &layout.tokens {
            match token.kind {
                TokenKind::Icon(index) => surface.draw_icon(index, token.x, token.y),
                TokenKind::Word | TokenKind::Symbol => {
                    surface.draw_text(&token.text, token.x, token.y, token.width, &token.style)
                }
            }
        }
        self.layout = Some(layout);
    }

    fn dispose(&mut self) {
        self.layout = None;
    }
}
