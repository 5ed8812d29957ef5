//! Client-space geometry shared by the drag and resize engines.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset_from(self, origin: Point) -> Point {
        Point {
            x: self.x - origin.x,
            y: self.y - origin.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A measured bounding box, as returned by `getBoundingClientRect`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn origin(self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(self) -> f64 {
        self.top + self.height
    }
}

/// Edges a dragged element's box must stay within.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub top: f64,
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Bounds {
    pub const fn new(top: f64, left: f64, right: f64, bottom: f64) -> Self {
        Self {
            top,
            left,
            right,
            bottom,
        }
    }

    /// Bounds of a `width` x `height` viewport anchored at the origin.
    pub const fn viewport(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Clamps a desired top-left so a box of `size` stays inside.
    ///
    /// The far edge is applied last: a box larger than the bounds lines up with the right or
    /// bottom edge and overhangs the left or top one.
    pub fn clamp_origin(self, desired: Point, size: Size) -> Point {
        Point {
            x: desired.x.max(self.left).min(self.right - size.width),
            y: desired.y.max(self.top).min(self.bottom - size.height),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn clamp_keeps_box_inside_bounds() {
        let bounds = Bounds::viewport(500.0, 500.0);
        let size = Size::new(100.0, 50.0);

        assert_eq!(
            bounds.clamp_origin(Point::new(600.0, -20.0), size),
            Point::new(400.0, 0.0)
        );
        assert_eq!(
            bounds.clamp_origin(Point::new(120.0, 480.0), size),
            Point::new(120.0, 450.0)
        );
    }

    #[test]
    fn oversized_box_aligns_to_far_edge() {
        let bounds = Bounds::new(10.0, 10.0, 110.0, 110.0);
        let clamped = bounds.clamp_origin(Point::new(50.0, 50.0), Size::new(200.0, 20.0));
        assert_eq!(clamped, Point::new(-90.0, 50.0));
    }
}
