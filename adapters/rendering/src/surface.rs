//! Host drawing surface abstraction.

use deltaball_core::Viewport;
use glam::Vec2;

use crate::Color;

/// Immediate-mode 2D drawing target provided by the host.
///
/// Coordinates passed to the drawing calls are offset by the translation
/// accumulated through [`DrawSurface::translate`]. [`DrawSurface::save`] and
/// [`DrawSurface::restore`] push and pop that translation.
pub trait DrawSurface {
    /// Fills an axis-aligned rectangle.
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);

    /// Outlines an axis-aligned rectangle with the provided line width.
    fn stroke_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        line_width: f32,
        color: Color,
    );

    /// Fills an axis-aligned ellipse. Circles use equal radii.
    fn fill_ellipse(
        &mut self,
        center_x: f32,
        center_y: f32,
        radius_x: f32,
        radius_y: f32,
        color: Color,
    );

    /// Shifts the origin of subsequent drawing calls.
    fn translate(&mut self, dx: f32, dy: f32);

    /// Saves the current translation.
    fn save(&mut self);

    /// Restores the most recently saved translation.
    fn restore(&mut self);

    /// Draws a single line of text with its baseline at `y`.
    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color);

    /// Current dimensions of the surface.
    fn size(&self) -> Viewport;
}

/// Translation state for surfaces whose host API has no transform stack.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TranslationStack {
    offset: Vec2,
    saved: Vec<Vec2>,
}

impl TranslationStack {
    /// Creates a stack with no translation applied.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulated translation.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Shifts the current translation.
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.offset += Vec2::new(dx, dy);
    }

    /// Pushes the current translation.
    pub fn save(&mut self) {
        self.saved.push(self.offset);
    }

    /// Pops the last saved translation. Unbalanced restores are ignored.
    pub fn restore(&mut self) {
        if let Some(offset) = self.saved.pop() {
            self.offset = offset;
        }
    }

    /// Maps a point from the translated space to surface space.
    #[must_use]
    pub fn apply(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y) + self.offset
    }

    /// Drops every saved translation and resets the offset.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.saved.clear();
    }
}
