//! Book scene views.
//!
//! Each part of the book screen is a [`Renderable`] drawing onto a host
//! [`Surface`]; [`BookScene`] composes them and routes navigation input.

mod background;
mod book_list;
mod content;
mod page_indicator;
mod scene;
mod title;

use crate::layout::{MonospaceMeasure, TextMeasure, TextStyle};
use crate::library::Librarium;

pub use background::BackgroundView;
pub use book_list::BookListView;
pub use content::ContentView;
pub use page_indicator::PageIndicatorView;
pub use scene::{BookScene, LayoutPreset, NavigationEvent, SceneControl};
pub use title::TitleView;

/// Space between a view's frame and its contents.
pub const WINDOW_PADDING: f32 = 18.0;
/// Font size of the title and the page indicator.
pub const HEADING_FONT_SIZE: u32 = 32;

/// An axis-aligned rectangle in surface pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Shrink by `padding` on every side.
    pub fn inset(&self, padding: f32) -> Self {
        Self {
            x: self.x + padding,
            y: self.y + padding,
            width: (self.width - padding * 2.0).max(0.0),
            height: (self.height - padding * 2.0).max(0.0),
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// A host drawing target.
pub trait Surface: TextMeasure {
    fn clear(&mut self, rect: Rect);
    fn draw_text(&mut self, text: &str, x: f32, y: f32, max_width: f32, style: &TextStyle);
    fn draw_icon(&mut self, index: u32, x: f32, y: f32);
    fn draw_picture(&mut self, name: &str, rect: Rect);
    /// Highlight a selected list row.
    fn draw_cursor(&mut self, rect: Rect);
}

/// One part of the book scene.
pub trait Renderable {
    fn frame(&self) -> Rect;

    /// Capture whatever the view needs when it is shown.
    fn create(&mut self, _library: &Librarium) {}

    /// Redraw the view. Called every refresh.
    fn update(&mut self, library: &Librarium, surface: &mut dyn Surface);

    fn dispose(&mut self) {}
}

/// A recorded [`Surface`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rect),
    Text {
        text: String,
        x: f32,
        y: f32,
        max_width: f32,
        style: TextStyle,
    },
    Icon {
        index: u32,
        x: f32,
        y: f32,
    },
    Picture {
        name: String,
        rect: Rect,
    },
    Cursor(Rect),
}

/// A surface that records draw calls instead of rasterizing them.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface<M = MonospaceMeasure> {
    measure: M,
    commands: Vec<DrawCommand>,
}

impl<M: TextMeasure> RecordingSurface<M> {
    pub fn new(measure: M) -> Self {
        Self {
            measure,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Text of every recorded text command, in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl<M: TextMeasure> TextMeasure for RecordingSurface<M> {
    fn text_width(&self, text: &str, style: &TextStyle) -> f32 {
        self.measure.text_width(text, style)
    }
}

impl<M: TextMeasure> Surface for RecordingSurface<M> {
    fn clear(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::Clear(rect));
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, max_width: f32, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            max_width,
            style: *style,
        });
    }

    fn draw_icon(&mut self, index: u32, x: f32, y: f32) {
        self.commands.push(DrawCommand::Icon { index, x, y });
    }

    fn draw_picture(&mut self, name: &str, rect: Rect) {
        self.commands.push(DrawCommand::Picture {
            name: name.to_string(),
            rect,
        });
    }

    fn draw_cursor(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::Cursor(rect));
    }
}
