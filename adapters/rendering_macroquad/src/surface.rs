use deltaball_core::Viewport;
use deltaball_rendering::{Color, DrawSurface, TranslationStack};
use glam::Vec2;
use macroquad::{
    math::Vec2 as MacroquadVec2,
    shapes::{draw_circle, draw_rectangle, draw_rectangle_lines, draw_triangle},
    text::draw_text,
};

use crate::to_macroquad_color;

const ELLIPSE_SEGMENTS: usize = 32;

/// [`DrawSurface`] that issues macroquad immediate-mode draw calls.
#[derive(Debug, Default)]
pub(crate) struct MacroquadSurface {
    transform: TranslationStack,
    viewport: Option<Viewport>,
}

impl MacroquadSurface {
    /// Resets the translation and records the window size for a new frame.
    pub(crate) fn begin_frame(&mut self, viewport: Viewport) {
        self.transform.reset();
        self.viewport = Some(viewport);
    }
}

impl DrawSurface for MacroquadSurface {
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        let origin = self.transform.apply(x, y);
        draw_rectangle(origin.x, origin.y, width, height, to_macroquad_color(color));
    }

    fn stroke_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        line_width: f32,
        color: Color,
    ) {
        let origin = self.transform.apply(x, y);
        draw_rectangle_lines(
            origin.x,
            origin.y,
            width,
            height,
            line_width,
            to_macroquad_color(color),
        );
    }

    fn fill_ellipse(
        &mut self,
        center_x: f32,
        center_y: f32,
        radius_x: f32,
        radius_y: f32,
        color: Color,
    ) {
        let center = self.transform.apply(center_x, center_y);
        let color = to_macroquad_color(color);

        if radius_x == radius_y {
            draw_circle(center.x, center.y, radius_x, color);
            return;
        }

        let rim = ellipse_rim(center, Vec2::new(radius_x, radius_y), ELLIPSE_SEGMENTS);
        let hub = to_macroquad_vec2(center);
        for (start, end) in rim.iter().zip(rim.iter().cycle().skip(1)) {
            draw_triangle(hub, to_macroquad_vec2(*start), to_macroquad_vec2(*end), color);
        }
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.transform.translate(dx, dy);
    }

    fn save(&mut self) {
        self.transform.save();
    }

    fn restore(&mut self) {
        self.transform.restore();
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color) {
        let origin = self.transform.apply(x, y);
        let _ = draw_text(text, origin.x, origin.y, size, to_macroquad_color(color));
    }

    fn size(&self) -> Viewport {
        self.viewport.unwrap_or_else(|| {
            Viewport::new(
                macroquad::window::screen_width(),
                macroquad::window::screen_height(),
            )
        })
    }
}

/// Points evenly spaced by angle around an axis-aligned ellipse.
pub(crate) fn ellipse_rim(center: Vec2, radii: Vec2, segments: usize) -> Vec<Vec2> {
    let segments = segments.max(3);
    (0..segments)
        .map(|index| {
            let angle = index as f32 / segments as f32 * std::f32::consts::TAU;
            center + Vec2::new(angle.cos(), angle.sin()) * radii
        })
        .collect()
}

fn to_macroquad_vec2(point: Vec2) -> MacroquadVec2 {
    MacroquadVec2::new(point.x, point.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec2_close(actual: Vec2, expected: Vec2) {
        assert!(
            (actual - expected).length() < 1e-4,
            "expected {expected:?}, received {actual:?}"
        );
    }

    #[test]
    fn ellipse_rim_starts_on_the_positive_x_axis() {
        let rim = ellipse_rim(Vec2::new(10.0, 20.0), Vec2::new(4.0, 2.0), 4);

        assert_eq!(rim.len(), 4);
        assert_vec2_close(rim[0], Vec2::new(14.0, 20.0));
        assert_vec2_close(rim[1], Vec2::new(10.0, 22.0));
        assert_vec2_close(rim[2], Vec2::new(6.0, 20.0));
        assert_vec2_close(rim[3], Vec2::new(10.0, 18.0));
    }

    #[test]
    fn ellipse_rim_needs_at_least_a_triangle() {
        assert_eq!(ellipse_rim(Vec2::ZERO, Vec2::ONE, 0).len(), 3);
    }

    #[test]
    fn begin_frame_resets_translation_and_size() {
        let mut surface = MacroquadSurface::default();
        surface.translate(-40.0, -80.0);
        surface.save();

        let viewport = Viewport::new(640.0, 480.0);
        surface.begin_frame(viewport);

        assert_eq!(surface.transform.offset(), Vec2::ZERO);
        assert_eq!(surface.size(), viewport);
    }
}
