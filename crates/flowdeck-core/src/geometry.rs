//! Geometric primitives for slide layout and positioning.
//!
//! This module provides the geometric types used throughout Flowdeck for
//! positioning process shapes on a slide.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in slide space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangle anchored at its top-left corner
//! - [`Emu`] - English Metric Units, the integer length unit of OOXML
//!
//! # Units
//!
//! Every floating point value is expressed in inches ("presentation-length
//! units"). Values are converted to [`Emu`] only at the document boundary.
//!
//! # Coordinate System
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! The origin is the top-left corner of the slide and Y grows downward, the
//! same convention used by BPMN Diagram Interchange and by PresentationML.

use std::fmt;

/// Number of English Metric Units in one inch.
pub const EMU_PER_INCH: f64 = 914_400.0;

/// Number of English Metric Units in one typographic point.
pub const EMU_PER_POINT: f64 = 12_700.0;

/// A 2D point in slide coordinate space, in inches.
///
/// # Examples
///
/// ```
/// # use flowdeck_core::geometry::Point;
/// let p = Point::new(1.0, 2.0).add_point(Point::new(0.5, 0.5));
/// assert_eq!(p.x(), 1.5);
/// assert_eq!(p.y(), 2.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Creates a new point with the specified y-coordinate
    pub fn with_y(mut self, y: f64) -> Self {
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

    /// Divides both coordinates by `divisor`.
    pub fn scale_down(self, divisor: f64) -> Self {
        Self {
            x: self.x / divisor,
            y: self.y / divisor,
        }
    }
}

/// Width and height, in inches.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    /// Creates a new size
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns the width
    pub fn width(self) -> f64 {
        self.width
    }

    /// Returns the height
    pub fn height(self) -> f64 {
        self.height
    }

    /// Divides both dimensions by `divisor`.
    pub fn scale_down(self, divisor: f64) -> Self {
        Self {
            width: self.width / divisor,
            height: self.height / divisor,
        }
    }
}

/// An axis-aligned rectangle described by its top-left corner and size.
///
/// This matches how both BPMN `dc:Bounds` and DrawingML `a:xfrm` describe a
/// shape, so no center/corner conversion happens anywhere in the pipeline.
///
/// # Examples
///
/// ```
/// # use flowdeck_core::geometry::{Bounds, Point, Size};
/// let bounds = Bounds::new(Point::new(1.0, 2.0), Size::new(4.0, 2.0));
/// assert_eq!(bounds.right(), 5.0);
/// assert_eq!(bounds.center().y(), 3.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    origin: Point,
    size: Size,
}

impl Bounds {
    /// Creates bounds from a top-left corner and a size
    pub fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Creates bounds from raw x, y, width and height values
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(Point::new(x, y), Size::new(width, height))
    }

    pub fn x(self) -> f64 {
        self.origin.x
    }

    pub fn y(self) -> f64 {
        self.origin.y
    }

    pub fn width(self) -> f64 {
        self.size.width
    }

    pub fn height(self) -> f64 {
        self.size.height
    }

    /// Same as [`Bounds::x`]; reads better next to [`Bounds::right`].
    pub fn left(self) -> f64 {
        self.origin.x
    }

    /// Same as [`Bounds::y`]; reads better next to [`Bounds::bottom`].
    pub fn top(self) -> f64 {
        self.origin.y
    }

    pub fn right(self) -> f64 {
        self.origin.x + self.size.width
    }

    pub fn bottom(self) -> f64 {
        self.origin.y + self.size.height
    }

    /// Returns the center point of the rectangle
    pub fn center(self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    /// Returns a copy with the top edge moved to `y`; the size is unchanged.
    pub fn with_y(self, y: f64) -> Self {
        Self {
            origin: self.origin.with_y(y),
            size: self.size,
        }
    }

    /// Returns a copy moved by `offset`.
    pub fn translate(self, offset: Point) -> Self {
        Self {
            origin: self.origin.add_point(offset),
            size: self.size,
        }
    }

    /// Divides every component by `divisor`.
    ///
    /// Used to turn Diagram Interchange units into inches. The transform is
    /// a plain division of each of the four values, nothing else.
    pub fn scale_down(self, divisor: f64) -> Self {
        Self {
            origin: self.origin.scale_down(divisor),
            size: self.size.scale_down(divisor),
        }
    }

    /// Converts the rectangle into EMU.
    ///
    /// A negative width or height becomes zero; OOXML extents are unsigned.
    pub fn to_emu(self) -> EmuRect {
        EmuRect {
            x: Emu::from_inches(self.x()),
            y: Emu::from_inches(self.y()),
            cx: Emu::from_inches(self.width().max(0.0)),
            cy: Emu::from_inches(self.height().max(0.0)),
        }
    }
}

/// A length in English Metric Units.
///
/// # Examples
///
/// ```
/// # use flowdeck_core::geometry::Emu;
/// assert_eq!(Emu::from_inches(1.0).get(), 914_400);
/// assert_eq!(Emu::from_points(1.0).get(), 12_700);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Emu(i64);

impl Emu {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Converts inches to EMU, rounding to the nearest unit
    pub fn from_inches(inches: f64) -> Self {
        Self((inches * EMU_PER_INCH).round() as i64)
    }

    /// Converts typographic points to EMU, rounding to the nearest unit
    pub fn from_points(points: f64) -> Self {
        Self((points * EMU_PER_POINT).round() as i64)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Emu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A point in EMU.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmuPoint {
    pub x: Emu,
    pub y: Emu,
}

impl EmuPoint {
    pub fn new(x: Emu, y: Emu) -> Self {
        Self { x, y }
    }
}

/// A rectangle in EMU, laid out like DrawingML's `a:off` / `a:ext` pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmuRect {
    pub x: Emu,
    pub y: Emu,
    pub cx: Emu,
    pub cy: Emu,
}

impl EmuRect {
    pub fn left(&self) -> Emu {
        self.x
    }

    pub fn top(&self) -> Emu {
        self.y
    }

    pub fn right(&self) -> Emu {
        Emu(self.x.0 + self.cx.0)
    }

    pub fn bottom(&self) -> Emu {
        Emu(self.y.0 + self.cy.0)
    }

    pub fn center_x(&self) -> Emu {
        Emu(self.x.0 + self.cx.0 / 2)
    }

    pub fn center_y(&self) -> Emu {
        Emu(self.y.0 + self.cy.0 / 2)
    }

    /// Smallest rectangle spanning two points, plus the flips needed so that
    /// a line drawn from the rectangle's top-left to bottom-right runs from
    /// `begin` to `end`.
    ///
    /// Returns `(rect, flip_h, flip_v)`.
    pub fn spanning(begin: EmuPoint, end: EmuPoint) -> (Self, bool, bool) {
        let rect = Self {
            x: begin.x.min(end.x),
            y: begin.y.min(end.y),
            cx: Emu((end.x.0 - begin.x.0).abs()),
            cy: Emu((end.y.0 - begin.y.0).abs()),
        };
        (rect, end.x < begin.x, end.y < begin.y)
    }
}
