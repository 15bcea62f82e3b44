//! Geometric primitives for floating element layout.
//!
//! # Overview
//!
//! - [`Point`] - A 2D position in layout units
//! - [`Extent`] - A horizontal span (`left..=right`) in layout units
//! - [`Zone`] - A rectangle in facsimile (source image) space
//!
//! # Coordinate Systems
//!
//! Two coordinate spaces coexist. Layout space is produced by the engine's own
//! placement passes. Facsimile space is the pixel space of a scanned source
//! image, supplied by the encoding. Both use a top-left origin:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     ▼
//!    +Y
//! ```

/// A 2D point in layout coordinate space.
///
/// # Examples
///
/// ```
/// # use cadenza_core::geometry::Point;
/// let anchor = Point::new(120.0, 40.0);
/// let moved = anchor.add_point(Point::new(5.0, -10.0));
///
/// assert_eq!(moved.x(), 125.0);
/// assert_eq!(moved.y(), 30.0);
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

    /// Creates a new point with the specified x-coordinate
    pub fn with_x(mut self, x: f32) -> Self {
        self.x = x;
        self
    }

    /// Creates a new point with the specified y-coordinate
    pub fn with_y(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

/// A horizontal extent on one staff, from `left` to `right`.
///
/// The constructor orders its arguments so that `left <= right` always holds.
///
/// # Examples
///
/// ```
/// # use cadenza_core::geometry::Extent;
/// let extent = Extent::new(150.0, 90.0);
///
/// assert_eq!(extent.left(), 90.0);
/// assert_eq!(extent.right(), 150.0);
/// assert_eq!(extent.width(), 60.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Extent {
    left: f32,
    right: f32,
}

impl Extent {
    /// Creates an extent covering both edges, whatever their order.
    pub fn new(a: f32, b: f32) -> Self {
        Self {
            left: a.min(b),
            right: a.max(b),
        }
    }

    /// Left edge.
    pub fn left(self) -> f32 {
        self.left
    }

    /// Right edge.
    pub fn right(self) -> f32 {
        self.right
    }

    /// Distance between the two edges.
    pub fn width(self) -> f32 {
        self.right - self.left
    }

    /// Returns `true` if `x` lies within the extent, edges included.
    pub fn contains(self, x: f32) -> bool {
        self.left <= x && x <= self.right
    }

    /// Returns the smallest extent covering both `self` and `other`.
    pub fn merge(self, other: Extent) -> Self {
        Self {
            left: self.left.min(other.left),
            right: self.right.max(other.right),
        }
    }
}

/// A rectangular zone on a facsimile surface.
///
/// Coordinates are source-image pixels: `(ulx, uly)` is the upper-left corner
/// and `(lrx, lry)` the lower-right corner.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Zone {
    ulx: f32,
    uly: f32,
    lrx: f32,
    lry: f32,
}

impl Zone {
    /// Creates a zone from its two corners.
    pub fn new(ulx: f32, uly: f32, lrx: f32, lry: f32) -> Self {
        Self { ulx, uly, lrx, lry }
    }

    /// Upper-left x.
    pub fn ulx(self) -> f32 {
        self.ulx
    }

    /// Upper-left y.
    pub fn uly(self) -> f32 {
        self.uly
    }

    /// Lower-right x.
    pub fn lrx(self) -> f32 {
        self.lrx
    }

    /// Lower-right y.
    pub fn lry(self) -> f32 {
        self.lry
    }

    /// The anchor used as drawing position when rendering in facsimile mode.
    pub fn upper_left(self) -> Point {
        Point::new(self.ulx, self.uly)
    }

    /// Horizontal span of the zone.
    pub fn horizontal_extent(self) -> Extent {
        Extent::new(self.ulx, self.lrx)
    }
}
