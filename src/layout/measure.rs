use unicode_width::UnicodeWidthStr;

use super::{DEFAULT_FONT_SIZE, TextStyle};

/// Text measurement hook supplied by the host's font context.
///
/// Every width the flow engine uses goes through this trait. Any
/// `Fn(&str) -> f32` closure is a measurer that ignores style.
pub trait TextMeasure {
    /// Rendered width of `text` in `style`, in surface pixels.
    fn text_width(&self, text: &str, style: &TextStyle) -> f32;
}

impl<F> TextMeasure for F
where
    F: Fn(&str) -> f32,
{
    fn text_width(&self, text: &str, _style: &TextStyle) -> f32 {
        self(text)
    }
}

/// Fixed-pitch measurer counting terminal display cells.
///
/// Wide (CJK) characters take two cells and zero-width marks none. Widths
/// scale with the style's font size relative to `base_font_size`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasure {
    pub cell_width: f32,
    pub base_font_size: u32,
}

impl MonospaceMeasure {
    pub fn new(cell_width: f32) -> Self {
        Self {
            cell_width,
            base_font_size: DEFAULT_FONT_SIZE,
        }
    }

    pub fn with_base_font_size(mut self, size: u32) -> Self {
        self.base_font_size = size.max(1);
        self
    }
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl TextMeasure for MonospaceMeasure {
    fn text_width(&self, text: &str, style: &TextStyle) -> f32 {
        let scale = style.font_size as f32 / self.base_font_size as f32;
        text.width() as f32 * self.cell_width * scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_measure_ignores_style() {
        let measure = |text: &str| text.len() as f32 * 2.0;
        let big = TextStyle::default().with_font_size(100);
        assert_eq!(measure.text_width("abc", &big), 6.0);
    }

    #[test]
    fn test_monospace_counts_cells() {
        let measure = MonospaceMeasure::new(10.0);
        let style = TextStyle::default();
        assert_eq!(measure.text_width("word", &style), 40.0);
        assert_eq!(measure.text_width("本", &style), 20.0);
        assert_eq!(measure.text_width("", &style), 0.0);
    }

    #[test]
    fn test_monospace_scales_with_font_size() {
        let measure = MonospaceMeasure::new(1.0);
        let double = TextStyle::default().with_font_size(DEFAULT_FONT_SIZE * 2);
        assert_eq!(measure.text_width("ab", &double), 4.0);
    }
}
