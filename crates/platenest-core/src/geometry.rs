//! Plate, part and cut geometry
//!
//! All coordinates are plate-local with the origin at the bottom-left
//! corner of the plate, X growing to the right and Y growing upwards.

use crate::error::GeometryError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest quantity a single catalog entry may ask for.
pub const MAX_QUANTITY: i64 = 100_000;

/// The fixed rectangular stock being cut.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plate {
    /// Horizontal extent
    pub width: f64,
    /// Vertical extent
    pub height: f64,
}

impl Plate {
    /// Create a plate, rejecting non-finite or non-positive dimensions.
    pub fn new(width: f64, height: f64) -> Result<Self, GeometryError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(GeometryError::InvalidPlate { width, height });
        }
        Ok(Self { width, height })
    }

    /// Plate area
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// True when `rect` lies entirely inside the plate.
    pub fn contains(&self, rect: &PlacedRect) -> bool {
        rect.x >= 0.0 && rect.y >= 0.0 && rect.right() <= self.width && rect.top() <= self.height
    }
}

impl fmt::Display for Plate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.width, self.height)
    }
}

/// One catalog line: a part size and how many of it are needed.
///
/// Quantity is signed so that malformed catalog rows survive
/// deserialization and can be filtered out instead of failing the load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartSpec {
    /// Horizontal dimension
    pub length: f64,
    /// Vertical dimension
    pub width: f64,
    /// Number of pieces
    pub quantity: i64,
}

impl PartSpec {
    pub fn new(length: f64, width: f64, quantity: i64) -> Self {
        Self {
            length,
            width,
            quantity,
        }
    }

    /// Whether this entry can produce at least one item.
    ///
    /// Quantities above [`MAX_QUANTITY`] are rejected like any other
    /// malformed row.
    pub fn is_valid(&self) -> bool {
        self.length.is_finite()
            && self.width.is_finite()
            && self.length > 0.0
            && self.width > 0.0
            && (1..=MAX_QUANTITY).contains(&self.quantity)
    }
}

/// A single physical piece expanded from a [`PartSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub length: f64,
    pub width: f64,
}

impl From<&PartSpec> for Item {
    fn from(spec: &PartSpec) -> Self {
        Self {
            length: spec.length,
            width: spec.width,
        }
    }
}

/// An item placed on the plate, anchored at its bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacedRect {
    pub x: f64,
    pub y: f64,
    /// Horizontal extent
    pub w: f64,
    /// Vertical extent
    pub h: f64,
}

impl PlacedRect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn top(&self) -> f64 {
        self.y + self.h
    }

    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    /// True when the interiors intersect. Shared edges do not count.
    pub fn overlaps(&self, other: &PlacedRect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.top()
            && other.y < self.top()
    }
}

/// Cut direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Constant X, parallel to the Y axis
    Vertical,
    /// Constant Y, parallel to the X axis
    Horizontal,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertical => write!(f, "vertical"),
            Self::Horizontal => write!(f, "horizontal"),
        }
    }
}

/// A straight line the tool traverses while engaged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CutSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl CutSegment {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Vertical cut at `x` from `y1` to `y2`.
    pub fn vertical(x: f64, y1: f64, y2: f64) -> Self {
        Self::new(x, y1, x, y2)
    }

    /// Horizontal cut at `y` from `x1` to `x2`.
    pub fn horizontal(y: f64, x1: f64, x2: f64) -> Self {
        Self::new(x1, y, x2, y)
    }

    /// Orientation of the segment, `None` for oblique lines.
    ///
    /// A zero-length segment reports as vertical.
    pub fn orientation(&self) -> Option<Orientation> {
        if self.x1 == self.x2 {
            Some(Orientation::Vertical)
        } else if self.y1 == self.y2 {
            Some(Orientation::Horizontal)
        } else {
            None
        }
    }

    /// Like [`orientation`](Self::orientation) but as a typed error.
    pub fn require_orientation(&self) -> Result<Orientation, GeometryError> {
        self.orientation().ok_or(GeometryError::NotAxisAligned {
            x1: self.x1,
            y1: self.y1,
            x2: self.x2,
            y2: self.y2,
        })
    }

    pub fn length(&self) -> f64 {
        (self.x2 - self.x1).hypot(self.y2 - self.y1)
    }

    pub fn with_x2(self, x2: f64) -> Self {
        Self { x2, ..self }
    }
}

impl From<[f64; 4]> for CutSegment {
    fn from([x1, y1, x2, y2]: [f64; 4]) -> Self {
        Self::new(x1, y1, x2, y2)
    }
}

impl fmt::Display for CutSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.2}, {:.2}) -> ({:.2}, {:.2})",
            self.x1, self.y1, self.x2, self.y2
        )
    }
}
