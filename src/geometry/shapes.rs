//! Wires, faces and compounds.

use std::slice::Iter;

use crate::geometry::bbox::BoundingBox;
use crate::geometry::{Point, Transform, Transformable, NEAR_ZERO};

/// Distance under which the two ends of a wire are considered joined.
pub const CLOSING_TOLERANCE: f64 = 1e-7;

/// A polyline, open or closed.
#[derive(Debug, Clone, PartialEq)]
pub struct Wire {
    /// The vertices of the wire. A closed wire does not repeat its first vertex.
    pub points: Vec<Point>,

    /// Whether the last vertex connects back to the first one.
    pub closed: bool,
}

impl Wire {
    /// Creates an open wire.
    pub fn open(points: Vec<Point>) -> Wire {
        Wire {
            points,
            closed: false,
        }
    }

    /// Creates a closed wire. A repeated first vertex at the end is dropped.
    pub fn closed(mut points: Vec<Point>) -> Wire {
        if points.len() > 1 {
            let (first, last) = (points[0], points[points.len() - 1]);
            if first.is_near(last, CLOSING_TOLERANCE) {
                points.pop();
            }
        }

        Wire {
            points,
            closed: true,
        }
    }

    /// Whether the wire forms a loop, either explicitly or because its ends meet.
    pub fn is_closed(&self) -> bool {
        if self.closed {
            return true;
        }

        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) if self.points.len() > 2 => {
                first.is_near(*last, CLOSING_TOLERANCE)
            }
            _ => false,
        }
    }

    /// Returns the wire as a loop, if it forms one.
    pub fn to_loop(&self) -> Option<Wire> {
        if self.is_closed() {
            Some(Wire::closed(self.points.clone()))
        } else {
            None
        }
    }

    /// The segments of the wire, including the closing one.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.points.len();
        let count = if self.closed && n > 2 {
            n
        } else {
            n.saturating_sub(1)
        };
        (0..count).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Signed area enclosed by the wire, positive when counter clockwise.
    ///
    /// Open wires enclose nothing.
    pub fn signed_area(&self) -> f64 {
        if !self.closed || self.points.len() < 3 {
            return 0.0;
        }

        self.segments().map(|(a, b)| a.cross(b)).sum::<f64>() / 2.0
    }

    /// Whether the loop has enough extent to bound a face.
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 3 || self.signed_area().abs() <= NEAR_ZERO
    }

    /// Even-odd point in polygon test.
    pub fn contains(&self, p: Point) -> bool {
        let mut inside = false;
        for (a, b) in self.segments() {
            if (a.y > p.y) != (b.y > p.y) {
                let x = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
                if p.x < x {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Winding number of the loop around `p`.
    pub fn winding_number(&self, p: Point) -> i32 {
        let mut winding = 0;
        for (a, b) in self.segments() {
            if a.y <= p.y {
                if b.y > p.y && (b - a).cross(p - a) > 0.0 {
                    winding += 1;
                }
            } else if b.y <= p.y && (b - a).cross(p - a) < 0.0 {
                winding -= 1;
            }
        }
        winding
    }

    /// The same wire travelled backwards.
    pub fn reversed(&self) -> Wire {
        let mut points = self.points.clone();
        points.reverse();
        Wire {
            points,
            closed: self.closed,
        }
    }

    /// The wire, oriented counter clockwise when `ccw` is set and clockwise otherwise.
    pub fn oriented(&self, ccw: bool) -> Wire {
        if (self.signed_area() > 0.0) == ccw {
            self.clone()
        } else {
            self.reversed()
        }
    }

    /// Bounding box of the vertices.
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(self.points.iter().copied())
    }
}

impl Transformable for Wire {
    fn transformed(&self, t: &Transform) -> Wire {
        Wire {
            points: self.points.iter().map(|p| t.apply(*p)).collect(),
            closed: self.closed,
        }
    }
}

/// A planar face, bounded by one or more loops.
///
/// The region of the face is the set of points around which the boundaries
/// have a non zero winding number: material loops run counter clockwise and
/// hole loops run clockwise when the face looks towards +Z.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    /// The boundary loops. The first one is the outer boundary.
    pub boundaries: Vec<Wire>,
}

impl Face {
    /// Creates a face from an outer loop and its holes, orienting them consistently.
    pub fn new(outer: &Wire, holes: &[Wire]) -> Face {
        let mut boundaries = vec![outer.oriented(true)];
        boundaries.extend(holes.iter().map(|hole| hole.oriented(false)));
        Face { boundaries }
    }

    /// The outer boundary.
    pub fn outer(&self) -> Option<&Wire> {
        self.boundaries.first()
    }

    /// Area of the face, as the signed sum of its boundary areas.
    ///
    /// The orientation of a face looking towards -Z makes this negative.
    pub fn area(&self) -> f64 {
        self.boundaries.iter().map(Wire::signed_area).sum()
    }

    /// The Z component of the face normal, or `None` when the face is degenerate.
    pub fn normal_z(&self) -> Option<f64> {
        let area = self.outer()?.signed_area();
        if area.abs() <= NEAR_ZERO {
            None
        } else {
            Some(area.signum())
        }
    }

    /// Flips the face so that it looks the other way.
    pub fn reverse(&mut self) {
        for boundary in &mut self.boundaries {
            *boundary = boundary.reversed();
        }
    }

    /// Whether `p` lies in the region of the face.
    pub fn contains(&self, p: Point) -> bool {
        self.boundaries
            .iter()
            .map(|b| b.winding_number(p))
            .sum::<i32>()
            != 0
    }

    /// Bounding box of the boundaries.
    pub fn bounding_box(&self) -> BoundingBox {
        self.boundaries
            .iter()
            .fold(BoundingBox::EMPTY, |bbox, b| bbox.union(b.bounding_box()))
    }
}

impl Transformable for Face {
    fn transformed(&self, t: &Transform) -> Face {
        let mut face = Face {
            boundaries: self.boundaries.iter().map(|b| b.transformed(t)).collect(),
        };

        // A mirroring transform flips the loops, keep the face looking the same way.
        if t.determinant() < 0.0 {
            face.reverse();
        }

        face
    }
}

/// One of the sub-shapes of a compound.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// An outline.
    Wire(Wire),

    /// A filled region.
    Face(Face),
}

impl Shape {
    /// Bounding box of the shape.
    pub fn bounding_box(&self) -> BoundingBox {
        match self {
            Shape::Wire(wire) => wire.bounding_box(),
            Shape::Face(face) => face.bounding_box(),
        }
    }

    /// The wires that outline the shape.
    pub fn wires(&self) -> Vec<&Wire> {
        match self {
            Shape::Wire(wire) => vec![wire],
            Shape::Face(face) => face.boundaries.iter().collect(),
        }
    }

    /// Area of the shape, zero for wires.
    pub fn area(&self) -> f64 {
        match self {
            Shape::Wire(_) => 0.0,
            Shape::Face(face) => face.area(),
        }
    }
}

impl Transformable for Shape {
    fn transformed(&self, t: &Transform) -> Shape {
        match self {
            Shape::Wire(wire) => Shape::Wire(wire.transformed(t)),
            Shape::Face(face) => Shape::Face(face.transformed(t)),
        }
    }
}

/// A group of independent sub-shapes, handled as a single shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compound {
    /// The sub-shapes, in order.
    pub shapes: Vec<Shape>,
}

impl Compound {
    /// Creates a compound from its sub-shapes.
    pub fn new(shapes: Vec<Shape>) -> Compound {
        Compound { shapes }
    }

    /// Number of sub-shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Whether the compound holds no sub-shape.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Iterates over the sub-shapes.
    pub fn iter(&self) -> Iter<Shape> {
        self.shapes.iter()
    }

    /// Unwraps the sub-shapes.
    pub fn into_shapes(self) -> Vec<Shape> {
        self.shapes
    }

    /// Bounding box of all the sub-shapes.
    ///
    /// Curves are flattened when glyphs are rasterized, so this box is tight.
    pub fn bounding_box(&self) -> BoundingBox {
        self.shapes
            .iter()
            .fold(BoundingBox::EMPTY, |bbox, s| bbox.union(s.bounding_box()))
    }

    /// Total area of the faces.
    pub fn area(&self) -> f64 {
        self.shapes.iter().map(Shape::area).sum()
    }
}

impl Transformable for Compound {
    fn transformed(&self, t: &Transform) -> Compound {
        Compound {
            shapes: self.shapes.iter().map(|s| s.transformed(t)).collect(),
        }
    }
}
