//! Escape-code aware text flow.
//!
//! [`TextFlowEngine`] turns a page's raw text into positioned
//! [`LayoutToken`]s. Word-wrapping is greedy: a word is committed on the line
//! it started on when it fits, or relocated whole to the next line when it
//! does not. Widths always come from a host-supplied [`TextMeasure`], so
//! proportional fonts work.

mod escape;
mod flow;
mod measure;

use serde::Serialize;

pub use escape::{
    Directive, EscapeInterpreter, NoSubstitutions, Segment, StandardEscapes, Substitutions,
};
pub use flow::{LayoutToken, TextFlowEngine, TextLayout, TokenKind};
pub use measure::{MonospaceMeasure, TextMeasure};

/// Default font size of the host's message text.
pub const DEFAULT_FONT_SIZE: u32 = 28;
/// Font size never grows past this through `\{`.
pub const MAX_FONT_SIZE: u32 = 108;
/// Font size never shrinks below this through `\}`.
pub const MIN_FONT_SIZE: u32 = 12;
/// Step applied by `\{` and `\}`.
pub const FONT_SIZE_STEP: u32 = 12;

/// A position in surface pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Rendering state that escape codes change mid-text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TextStyle {
    /// Index into the host's text color palette.
    pub color: u32,
    pub font_size: u32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: 0,
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl TextStyle {
    pub fn with_font_size(mut self, font_size: u32) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }

    /// `\{`: one step bigger, unless already large.
    pub fn bigger(&mut self) {
        if self.font_size <= MAX_FONT_SIZE - FONT_SIZE_STEP {
            self.font_size += FONT_SIZE_STEP;
        }
    }

    /// `\}`: one step smaller, unless already small.
    pub fn smaller(&mut self) {
        if self.font_size >= MIN_FONT_SIZE + FONT_SIZE_STEP {
            self.font_size -= FONT_SIZE_STEP;
        }
    }
}

/// The box text is flowed into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowArea {
    /// Top-left corner; also the left margin lines return to.
    pub origin: Point,
    pub content_width: f32,
    pub content_height: f32,
    pub line_height: f32,
}

impl FlowArea {
    pub fn new(origin: Point, content_width: f32, content_height: f32, line_height: f32) -> Self {
        Self {
            origin,
            content_width,
            content_height,
            line_height,
        }
    }

    pub fn right(&self) -> f32 {
        self.origin.x + self.content_width
    }

    pub fn bottom(&self) -> f32 {
        self.origin.y + self.content_height
    }
}
