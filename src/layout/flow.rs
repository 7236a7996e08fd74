use std::sync::Arc;

use log::debug;
use serde::Serialize;

use super::{
    Directive, EscapeInterpreter, FlowArea, Point, Segment, StandardEscapes, TextMeasure,
    TextStyle,
};
use crate::config::FlowSettings;

/// Space the host leaves below the tallest font on a line.
const LINE_LEADING: u32 = 8;

/// What a token draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "index", rename_all = "snake_case")]
pub enum TokenKind {
    /// A committed word followed by the boundary character that ended it.
    Word,
    /// Punctuation that did not follow a word.
    Symbol,
    /// An inline icon from the host's icon sheet.
    Icon(u32),
}

/// A positioned piece of laid-out text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutToken {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub line_height: f32,
    pub style: TextStyle,
    pub kind: TokenKind,
}

/// Output of one layout pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TextLayout {
    pub tokens: Vec<LayoutToken>,
    /// Where the cursor stopped; `cursor.y` is the top of the last line.
    pub cursor: Point,
    /// The last line extends below the flow area.
    pub overflow: bool,
}

impl TextLayout {
    /// Tokens grouped by line, top to bottom.
    pub fn lines(&self) -> Vec<&[LayoutToken]> {
        self.tokens
            .chunk_by(|a, b| a.y == b.y)
            .collect()
    }

    pub fn line_count(&self) -> usize {
        self.lines().len()
    }

    /// Height from `top` to the bottom of the last line with tokens.
    pub fn consumed_height(&self, top: f32) -> f32 {
        self.tokens
            .last()
            .map_or(0.0, |last| last.y + last.line_height - top)
    }
}

/// Greedy word-wrapping layout of page text.
///
/// A line is as tall as the area's line height, scaled up by
/// `(tallest + 8) / (base + 8)` when a font larger than the starting one
/// appears on it. Every token records the final height of its line.
///
/// The engine keeps no state between calls: every [`layout`](Self::layout)
/// owns its own cursor and pending-word buffer, so one engine can lay out
/// several pages concurrently.
#[derive(Clone)]
pub struct TextFlowEngine {
    escapes: Arc<dyn EscapeInterpreter>,
    icon_advance: f32,
    base_font_size: u32,
}

impl std::fmt::Debug for TextFlowEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextFlowEngine")
            .field("icon_advance", &self.icon_advance)
            .field("base_font_size", &self.base_font_size)
            .finish_non_exhaustive()
    }
}

impl Default for TextFlowEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextFlowEngine {
    pub fn new() -> Self {
        let settings = FlowSettings::default();
        Self {
            escapes: Arc::new(StandardEscapes::new()),
            icon_advance: settings.icon_advance,
            base_font_size: settings.base_font_size,
        }
    }

    pub fn with_escapes(mut self, escapes: Arc<dyn EscapeInterpreter>) -> Self {
        self.escapes = escapes;
        self
    }

    pub fn with_settings(mut self, settings: &FlowSettings) -> Self {
        self.icon_advance = settings.icon_advance;
        self.base_font_size = settings.base_font_size;
        self
    }

    /// Lay out `raw_text` inside `area`, starting at `area.origin` in the
    /// default color at the configured base font size.
    pub fn layout<M>(&self, raw_text: &str, measure: &M, area: &FlowArea) -> TextLayout
    where
        M: TextMeasure + ?Sized,
    {
        let style = TextStyle::default().with_font_size(self.base_font_size);
        self.layout_styled(raw_text, measure, area, style)
    }

    /// Lay out `raw_text` starting in `style`.
    pub fn layout_styled<M>(
        &self,
        raw_text: &str,
        measure: &M,
        area: &FlowArea,
        style: TextStyle,
    ) -> TextLayout
    where
        M: TextMeasure + ?Sized,
    {
        let mut pass = FlowPass::new(measure, area, style, self.icon_advance);
        for segment in self.escapes.interpret(raw_text) {
            match segment {
                Segment::Text(text) => {
                    for c in text.chars() {
                        pass.process_char(c);
                    }
                }
                Segment::Directive(directive) => pass.apply(directive),
            }
        }
        pass.finish()
    }
}

/// Cursor state threaded through one pass.
#[derive(Debug, Clone, Copy)]
struct TextCursor {
    index: usize,
    x: f32,
    y: f32,
    left_margin: f32,
    line_height: f32,
}

/// Word characters seen since the last boundary, not yet committed.
#[derive(Debug)]
struct PendingWord {
    text: String,
    start: Point,
    style: TextStyle,
}

struct FlowPass<'a, M: ?Sized> {
    measure: &'a M,
    area: &'a FlowArea,
    cursor: TextCursor,
    style: TextStyle,
    icon_advance: f32,
    pending: Option<PendingWord>,
    tokens: Vec<LayoutToken>,
    /// Index of the first token on the current line.
    line_start: usize,
    base_font_size: u32,
}

impl<'a, M> FlowPass<'a, M>
where
    M: TextMeasure + ?Sized,
{
    fn new(measure: &'a M, area: &'a FlowArea, style: TextStyle, icon_advance: f32) -> Self {
        Self {
            measure,
            area,
            cursor: TextCursor {
                index: 0,
                x: area.origin.x,
                y: area.origin.y,
                left_margin: area.origin.x,
                line_height: area.line_height,
            },
            style,
            icon_advance,
            pending: None,
            tokens: Vec::new(),
            line_start: 0,
            base_font_size: style.font_size,
        }
    }

    fn process_char(&mut self, c: char) {
        self.cursor.index += 1;
        match c {
            '\n' => {
                self.commit_word(None);
                self.new_line();
            }
            '\r' | '\u{c}' => {}
            c if is_word_char(c) => self.push_word_char(c),
            c => self.process_boundary(c),
        }
    }

    fn push_word_char(&mut self, c: char) {
        let cursor = self.cursor;
        let style = self.style;
        let word = self.pending.get_or_insert_with(|| PendingWord {
            text: String::new(),
            start: Point::new(cursor.x, cursor.y),
            style,
        });
        word.text.push(c);
        let width = self.measure.text_width(c.encode_utf8(&mut [0; 4]), &word.style);
        self.cursor.x += width;
    }

    fn process_boundary(&mut self, c: char) {
        let mut buf = [0; 4];
        let width = self.measure.text_width(c.encode_utf8(&mut buf), &self.style);

        if self.pending.is_some() {
            self.commit_word(Some((c, width)));
        } else if !c.is_whitespace() {
            self.tokens.push(LayoutToken {
                text: c.to_string(),
                x: self.cursor.x,
                y: self.cursor.y,
                width,
                line_height: self.cursor.line_height,
                style: self.style,
                kind: TokenKind::Symbol,
            });
        }
        self.cursor.x += width;
    }

    /// Commit the pending word, relocating it to a fresh line when it would
    /// cross the right edge. A word that already starts at the left margin
    /// stays put and overflows instead.
    fn commit_word(&mut self, boundary: Option<(char, f32)>) {
        let Some(word) = self.pending.take() else {
            return;
        };

        let word_width = self.measure.text_width(&word.text, &word.style);
        let mut start = word.start;
        if start.x + word_width > self.area.right() && start.x > self.cursor.left_margin {
            self.cursor.y += self.close_line();
            start = Point::new(self.cursor.left_margin, self.cursor.y);
            self.cursor.x = start.x + word_width;
        }

        let mut text = word.text;
        let mut width = word_width;
        if let Some((c, boundary_width)) = boundary {
            text.push(c);
            width += boundary_width;
        }

        self.tokens.push(LayoutToken {
            text,
            x: start.x,
            y: start.y,
            width,
            line_height: self.cursor.line_height,
            style: word.style,
            kind: TokenKind::Word,
        });
    }

    fn apply(&mut self, directive: Directive) {
        match directive {
            Directive::Color(color) => self.style.color = color,
            Directive::FontBigger => self.style.bigger(),
            Directive::FontSmaller => self.style.smaller(),
            Directive::Icon(index) => self.place_icon(index),
        }
    }

    fn place_icon(&mut self, index: u32) {
        self.commit_word(None);
        if self.cursor.x + self.icon_advance > self.area.right()
            && self.cursor.x > self.cursor.left_margin
        {
            self.new_line();
        }
        self.tokens.push(LayoutToken {
            text: String::new(),
            x: self.cursor.x,
            y: self.cursor.y,
            width: self.icon_advance,
            line_height: self.cursor.line_height,
            style: self.style,
            kind: TokenKind::Icon(index),
        });
        self.cursor.x += self.icon_advance;
    }

    fn new_line(&mut self) {
        let height = self.close_line();
        self.cursor.x = self.cursor.left_margin;
        self.cursor.y += height;
    }

    fn current_line_height(&self) -> f32 {
        let tallest = self.tokens[self.line_start..]
            .iter()
            .map(|token| token.style.font_size)
            .max()
            .unwrap_or(self.base_font_size);
        let scale = (tallest + LINE_LEADING) as f32 / (self.base_font_size + LINE_LEADING) as f32;
        self.cursor.line_height * scale.max(1.0)
    }

    /// Stamp the current line's height on its tokens and return it.
    fn close_line(&mut self) -> f32 {
        let height = self.current_line_height();
        for token in &mut self.tokens[self.line_start..] {
            token.line_height = height;
        }
        self.line_start = self.tokens.len();
        height
    }

    fn finish(mut self) -> TextLayout {
        self.commit_word(None);
        self.close_line();
        // Trailing blank lines draw nothing.
        let overflow = self
            .tokens
            .last()
            .is_some_and(|last| last.y + last.line_height > self.area.bottom());
        debug!(
            "flowed {} chars into {} tokens (overflow: {})",
            self.cursor.index,
            self.tokens.len(),
            overflow
        );
        TextLayout {
            tokens: self.tokens,
            cursor: Point::new(self.cursor.x, self.cursor.y),
            overflow,
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
