//! Bounding box geometry and its validation rules.
//!
//! A capture's bounding boxes are meaningless without the dimensions of the
//! screenshot they were measured against, so validation always takes a
//! [`Bounds`] context computed once from the decoded image.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// An axis-aligned bounding box in XYXY order (x1, y1, x2, y2).
///
/// Coordinates are signed so that malformed wire input (negative values) can
/// be represented and rejected by [`validate_bbox`] with a precise error,
/// rather than failing opaquely during deserialization.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct BBox {
    pub x1: i64,
    pub y1: i64,
    pub x2: i64,
    pub y2: i64,
}

impl BBox {
    /// Creates a new bounding box from explicit coordinates.
    #[inline]
    pub fn new(x1: i64, y1: i64, x2: i64, y2: i64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Returns true if the box is properly ordered (x1 <= x2 and y1 <= y2).
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.x1 <= self.x2 && self.y1 <= self.y2
    }

    /// Returns true if all four coordinates are non-negative.
    #[inline]
    pub fn is_non_negative(&self) -> bool {
        self.x1 >= 0 && self.y1 >= 0 && self.x2 >= 0 && self.y2 >= 0
    }
}

impl fmt::Debug for BBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BBox({}, {}, {}, {})", self.x1, self.y1, self.x2, self.y2)
    }
}

// Serializes as the wire shape: a four-element array [x1, y1, x2, y2].
impl Serialize for BBox {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.x1, self.y1, self.x2, self.y2].serialize(serializer)
    }
}

/// The `(width, height)` of a capture's screenshot.
///
/// This is the read-only context every bounding box in the tree is validated
/// against. It is computed once from the decoded image and threaded through
/// each recursive validation call; no node carries its own copy.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    /// Creates a new bounds context.
    #[inline]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Debug for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bounds({}x{})", self.width, self.height)
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

// Serializes as [width, height], matching the persisted `image_size` field.
impl Serialize for Bounds {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.width, self.height].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Bounds {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let [width, height] = <[u32; 2]>::deserialize(deserializer)?;
        Ok(Bounds { width, height })
    }
}

/// The axis on which a bounds check failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// A bounding box that failed validation, with the rule it broke.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GeometryError {
    #[error("bbox ({x1}, {y1}, {x2}, {y2}) is inverted: x1 <= x2 and y1 <= y2 required")]
    Inverted { x1: i64, y1: i64, x2: i64, y2: i64 },

    #[error("bbox ({x1}, {y1}, {x2}, {y2}) has negative coordinates: all must be >= 0")]
    Negative { x1: i64, y1: i64, x2: i64, y2: i64 },

    #[error("bbox {axis} coordinates ({min}, {max}) exceed the image {axis} bound {limit}")]
    OutOfBounds {
        axis: Axis,
        min: i64,
        max: i64,
        limit: u32,
    },
}

impl GeometryError {
    fn inverted(bbox: &BBox) -> Self {
        GeometryError::Inverted {
            x1: bbox.x1,
            y1: bbox.y1,
            x2: bbox.x2,
            y2: bbox.y2,
        }
    }

    fn negative(bbox: &BBox) -> Self {
        GeometryError::Negative {
            x1: bbox.x1,
            y1: bbox.y1,
            x2: bbox.x2,
            y2: bbox.y2,
        }
    }
}

/// Validates a bounding box against the image bounds.
///
/// Checks, in order: coordinate ordering, non-negativity, and containment
/// within `bounds`. The first violated rule is reported; each error names
/// the offending coordinates. Pure and deterministic.
///
/// Containment is inclusive: a box whose edge sits exactly on the image
/// edge (e.g. `x2 == width`) is valid.
pub fn validate_bbox(bbox: &BBox, bounds: Bounds) -> Result<(), GeometryError> {
    if !bbox.is_ordered() {
        return Err(GeometryError::inverted(bbox));
    }
    if !bbox.is_non_negative() {
        return Err(GeometryError::negative(bbox));
    }
    if bbox.x1 > i64::from(bounds.width) || bbox.x2 > i64::from(bounds.width) {
        return Err(GeometryError::OutOfBounds {
            axis: Axis::X,
            min: bbox.x1,
            max: bbox.x2,
            limit: bounds.width,
        });
    }
    if bbox.y1 > i64::from(bounds.height) || bbox.y2 > i64::from(bounds.height) {
        return Err(GeometryError::OutOfBounds {
            axis: Axis::Y,
            min: bbox.y1,
            max: bbox.y2,
            limit: bounds.height,
        });
    }
    Ok(())
}
