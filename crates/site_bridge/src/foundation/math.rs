//! Math utilities and types
//!
//! Integer screen-space geometry for window placement. Coordinates follow the
//! desktop convention: origin at the top-left of the virtual screen, Y down.

pub use nalgebra::{Point2, Vector2};

/// Screen position in pixels
pub type Point = Point2<i32>;

/// Width and height in pixels
pub type Extent = Vector2<i32>;

/// Axis-aligned screen rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    /// Top-left corner
    pub origin: Point,

    /// Width and height
    pub size: Extent,
}

impl Rect {
    /// Create a rectangle from position and size components
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Extent::new(width, height),
        }
    }

    /// Create a rectangle from an origin and a size
    pub fn from_parts(origin: Point, size: Extent) -> Self {
        Self { origin, size }
    }

    /// Left edge
    pub fn left(&self) -> i32 {
        self.origin.x
    }

    /// Top edge
    pub fn top(&self) -> i32 {
        self.origin.y
    }

    /// Right edge (exclusive)
    pub fn right(&self) -> i32 {
        self.origin.x + self.size.x
    }

    /// Bottom edge (exclusive)
    pub fn bottom(&self) -> i32 {
        self.origin.y + self.size.y
    }

    /// Width in pixels
    pub fn width(&self) -> i32 {
        self.size.x
    }

    /// Height in pixels
    pub fn height(&self) -> i32 {
        self.size.y
    }

    /// Check whether a point lies inside the rectangle
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left() && point.x < self.right()
            && point.y >= self.top() && point.y < self.bottom()
    }

    /// Top-left position that centers a box of `size` inside this rectangle
    ///
    /// Uses truncating integer division, so an odd leftover pixel goes to the
    /// right/bottom side. A box larger than the rectangle gets a position
    /// before the rectangle's origin.
    pub fn centered_origin(&self, size: Extent) -> Point {
        let offset = (self.size - size) / 2;
        self.origin + offset
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::new(0, 0, 0, 0)
    }
}
