//! Axis-aligned rectangles in logical pixels (y grows downward).

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Horizontal center.
    pub x: f32,
    /// Vertical center.
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Build a rectangle from known-good constants.
    ///
    /// Use [`Rect::try_new`] when the size comes from outside the program.
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns `None` unless both dimensions are strictly positive.
    pub fn try_new(x: f32, y: f32, width: f32, height: f32) -> Option<Self> {
        if width > 0.0 && height > 0.0 {
            Some(Self::new(x, y, width, height))
        } else {
            None
        }
    }

    pub fn top(&self) -> f32 {
        self.y - self.height / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn left(&self) -> f32 {
        self.x - self.width / 2.0
    }

    pub fn right(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Strict overlap: rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Half-open containment (left/top edges inside, right/bottom outside).
    pub fn contains_point(&self, px: f32, py: f32) -> bool {
        px >= self.left() && px < self.right() && py >= self.top() && py < self.bottom()
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Rect {
        Rect {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Same size, moved vertically so that `bottom() == bottom`.
    pub fn with_bottom(&self, bottom: f32) -> Rect {
        Rect {
            y: bottom - self.height / 2.0,
            ..*self
        }
    }
}
