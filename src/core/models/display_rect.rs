use crate::global_constants;

/// A pointer position in preview canvas coordinates. May fall outside the
/// canvas when the pointer leaves it mid-drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayPoint {
    pub x: f32,
    pub y: f32,
}

impl DisplayPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// The two corners of a drag gesture, in the order they were produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayRect {
    pub start: DisplayPoint,
    pub end: DisplayPoint,
}

impl DisplayRect {
    pub fn from_corners(start: DisplayPoint, end: DisplayPoint) -> Self {
        Self { start, end }
    }

    /// Returns `(left, top, right, bottom)` regardless of drag direction.
    pub fn normalized_bounds(&self) -> (f32, f32, f32, f32) {
        (
            self.start.x.min(self.end.x),
            self.start.y.min(self.end.y),
            self.start.x.max(self.end.x),
            self.start.y.max(self.end.y),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

impl CanvasSize {
    pub fn fixed_preview() -> Self {
        Self {
            width: global_constants::PREVIEW_CANVAS_WIDTH,
            height: global_constants::PREVIEW_CANVAS_HEIGHT,
        }
    }
}
