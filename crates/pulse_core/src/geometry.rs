//! 2D geometry primitives
//!
//! Plain-old-data value types. `Rect` doubles as the bounds rectangle
//! shared across all particles of one effect; it is immutable by
//! convention (`Copy`, no mutating methods).

use serde::{Deserialize, Serialize};

/// 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared distance to another point
    pub fn distance_sq(&self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// The larger of the two dimensions
    pub fn max_dimension(&self) -> f32 {
        self.width.max(self.height)
    }
}

/// 2D vector (velocities, per-axis variance)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 2D rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Create a rect from center point and size
    pub fn from_center(center: Point, size: Size) -> Self {
        Rect {
            origin: Point::new(center.x - size.width / 2.0, center.y - size.height / 2.0),
            size,
        }
    }

    pub fn x(&self) -> f32 {
        self.origin.x
    }

    pub fn y(&self) -> f32 {
        self.origin.y
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.origin.x
            && point.x < self.right()
            && point.y >= self.origin.y
            && point.y < self.bottom()
    }

    /// Containment test against the rect expanded by `margin` on every side.
    ///
    /// Particle culling calls this with a `radius * 2` margin so a shape
    /// only counts as gone once it has fully left the expanded bounds.
    pub fn contains_with_margin(&self, point: Point, margin: f32) -> bool {
        point.x >= self.origin.x - margin
            && point.x < self.right() + margin
            && point.y >= self.origin.y - margin
            && point.y < self.bottom() + margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_center() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.center(), Point::new(60.0, 45.0));
    }

    #[test]
    fn test_rect_from_center_round_trips() {
        let rect = Rect::from_center(Point::new(60.0, 45.0), Size::new(100.0, 50.0));
        assert_eq!(rect, Rect::new(10.0, 20.0, 100.0, 50.0));
    }

    #[test]
    fn test_contains() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(rect.contains(Point::new(0.0, 0.0)));
        assert!(rect.contains(Point::new(99.9, 99.9)));
        assert!(!rect.contains(Point::new(100.0, 50.0)));
        assert!(!rect.contains(Point::new(-0.1, 50.0)));
    }

    #[test]
    fn test_contains_with_margin() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(rect.contains_with_margin(Point::new(-30.0, 50.0), 60.0));
        assert!(rect.contains_with_margin(Point::new(159.9, 50.0), 60.0));
        assert!(!rect.contains_with_margin(Point::new(160.0, 50.0), 60.0));
        assert!(!rect.contains_with_margin(Point::new(50.0, -61.0), 60.0));
    }

    #[test]
    fn test_point_distance_sq() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance_sq(b) - 25.0).abs() < 1e-6);
    }
}
