//! Surface that records draw calls for assertions.

use deltaball_core::Viewport;

use crate::{Color, DrawSurface};

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum DrawOp {
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
    StrokeRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        line_width: f32,
        color: Color,
    },
    FillEllipse {
        center_x: f32,
        center_y: f32,
        radius_x: f32,
        radius_y: f32,
        color: Color,
    },
    Translate {
        dx: f32,
        dy: f32,
    },
    Save,
    Restore,
    Text {
        text: String,
        color: Color,
    },
}

#[derive(Debug)]
pub(crate) struct RecordingSurface {
    pub(crate) ops: Vec<DrawOp>,
    viewport: Viewport,
}

impl RecordingSurface {
    pub(crate) fn new(viewport: Viewport) -> Self {
        Self {
            ops: Vec::new(),
            viewport,
        }
    }

    pub(crate) fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl DrawSurface for RecordingSurface {
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.ops.push(DrawOp::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
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
        self.ops.push(DrawOp::StrokeRect {
            x,
            y,
            width,
            height,
            line_width,
            color,
        });
    }

    fn fill_ellipse(
        &mut self,
        center_x: f32,
        center_y: f32,
        radius_x: f32,
        radius_y: f32,
        color: Color,
    ) {
        self.ops.push(DrawOp::FillEllipse {
            center_x,
            center_y,
            radius_x,
            radius_y,
            color,
        });
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.ops.push(DrawOp::Translate { dx, dy });
    }

    fn save(&mut self) {
        self.ops.push(DrawOp::Save);
    }

    fn restore(&mut self) {
        self.ops.push(DrawOp::Restore);
    }

    fn draw_text(&mut self, text: &str, _x: f32, _y: f32, _size: f32, color: Color) {
        self.ops.push(DrawOp::Text {
            text: text.to_owned(),
            color,
        });
    }

    fn size(&self) -> Viewport {
        self.viewport
    }
}
