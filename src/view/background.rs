use super::{Rect, Renderable, Surface};
use crate::library::Librarium;

/// A picture stretched behind the whole scene.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundView {
    frame: Rect,
    image: String,
}

impl BackgroundView {
    pub fn new(frame: Rect, image: impl Into<String>) -> Self {
        Self {
            frame,
            image: image.into(),
        }
    }

    pub fn image(&self) -> &str {
        &self.image
    }
}

impl Renderable for BackgroundView {
    fn frame(&self) -> Rect {
        self.frame
    }

    fn update(&mut self, _library: &Librarium, surface: &mut dyn Surface) {
        surface.draw_picture(&self.image, self.frame);
    }
}
