//! Axis-aligned bounding boxes.

use crate::geometry::Point;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Smallest x coordinate.
    pub x_min: f64,

    /// Smallest y coordinate.
    pub y_min: f64,

    /// Largest x coordinate.
    pub x_max: f64,

    /// Largest y coordinate.
    pub y_max: f64,
}

impl Default for BoundingBox {
    fn default() -> BoundingBox {
        BoundingBox::EMPTY
    }
}

impl BoundingBox {
    /// An empty (inverted) bounding box, neutral for [`BoundingBox::union`].
    pub const EMPTY: BoundingBox = BoundingBox {
        x_min: f64::INFINITY,
        y_min: f64::INFINITY,
        x_max: f64::NEG_INFINITY,
        y_max: f64::NEG_INFINITY,
    };

    /// The smallest box containing every point of the iterator.
    pub fn from_points<I: IntoIterator<Item = Point>>(points: I) -> BoundingBox {
        points
            .into_iter()
            .fold(BoundingBox::EMPTY, |bbox, p| bbox.including(p))
    }

    /// Whether the box contains at least one point.
    pub fn is_valid(&self) -> bool {
        self.x_min <= self.x_max && self.y_min <= self.y_max
    }

    /// Grows the box so it contains `p`.
    pub fn including(self, p: Point) -> BoundingBox {
        BoundingBox {
            x_min: self.x_min.min(p.x),
            y_min: self.y_min.min(p.y),
            x_max: self.x_max.max(p.x),
            y_max: self.y_max.max(p.y),
        }
    }

    /// The smallest box containing both boxes.
    pub fn union(self, other: BoundingBox) -> BoundingBox {
        BoundingBox {
            x_min: self.x_min.min(other.x_min),
            y_min: self.y_min.min(other.y_min),
            x_max: self.x_max.max(other.x_max),
            y_max: self.y_max.max(other.y_max),
        }
    }

    /// Width of the box, zero when empty.
    pub fn x_length(&self) -> f64 {
        if self.is_valid() {
            self.x_max - self.x_min
        } else {
            0.0
        }
    }

    /// Height of the box, zero when empty.
    pub fn y_length(&self) -> f64 {
        if self.is_valid() {
            self.y_max - self.y_min
        } else {
            0.0
        }
    }

    /// Length of the diagonal, zero when empty.
    pub fn diagonal_length(&self) -> f64 {
        self.x_length().hypot(self.y_length())
    }

    /// The center of the box.
    pub fn center(&self) -> Point {
        Point::new(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }

    /// Whether the two boxes share at least one point.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.is_valid()
            && other.is_valid()
            && self.x_min <= other.x_max
            && other.x_min <= self.x_max
            && self.y_min <= other.y_max
            && other.y_min <= self.y_max
    }
}
