//! Geometric primitives for diagram positioning.
//!
//! This module provides the fundamental geometric types used throughout
//! Arguendo for node positions, pointer locations, and pan offsets.
//!
//! # Coordinate System
//!
//! Arguendo uses a coordinate system consistent with SVG and screen space:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward
//!
//! The same types describe both screen coordinates (pointer events, pan
//! offsets) and logical canvas coordinates (node positions); the
//! [`viewport`](crate::viewport) module converts between the two spaces.

/// A 2D point, used for both screen and logical canvas coordinates.
///
/// Points use `f32` coordinates and provide the small set of vector
/// operations the engine needs.
///
/// # Examples
///
/// ```
/// # use arguendo_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
///
/// let mid = p1.midpoint(p2);
/// assert_eq!(mid.x(), 7.5);
/// assert_eq!(mid.y(), 12.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point.
    ///
    /// # Examples
    ///
    /// ```
    /// # use arguendo_core::geometry::Point;
    /// let pointer = Point::new(120.0, 80.0);
    /// let node_top_left = Point::new(100.0, 50.0);
    ///
    /// let offset = pointer.sub_point(node_top_left);
    /// assert_eq!(offset.x(), 20.0);
    /// assert_eq!(offset.y(), 30.0);
    /// ```
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Multiplies both coordinates by the given factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

/// Represents the dimensions of an element with width and height.
///
/// Node heights are often content-determined and unknown to the engine; the
/// model layer represents that case separately and falls back to a fixed
/// height for geometry, so `Size` itself is always fully resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns the center of an element with this size placed at `top_left`
    pub fn center_from(self, top_left: Point) -> Point {
        Point::new(
            top_left.x() + self.width / 2.0,
            top_left.y() + self.height / 2.0,
        )
    }
}
