//! Face construction and boolean fuse.
//!
//! The [`ShapeKernel`] trait is the seam between text layout and the solid
//! modeler. [`PlanarKernel`] implements it on the planar shapes of this crate.

use std::{error, fmt, result};

use crate::geometry::shapes::{Face, Wire};
use crate::geometry::Point;

/// The ways a set of loops can be turned into faces.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FaceMaker {
    /// Nested loops alternate between material and hole, at any depth.
    Bullseye,

    /// Outer loops with one level of holes, no islands inside holes.
    Cheese,

    /// One face per loop, without hole detection.
    Simple,
}

impl FaceMaker {
    /// The order in which face makers are tried when building glyph faces.
    pub const FALLBACK_CHAIN: [FaceMaker; 3] =
        [FaceMaker::Bullseye, FaceMaker::Cheese, FaceMaker::Simple];

    /// The name of the face maker.
    pub fn name(self) -> &'static str {
        match self {
            FaceMaker::Bullseye => "bullseye",
            FaceMaker::Cheese => "cheese",
            FaceMaker::Simple => "simple",
        }
    }
}

/// Failures of the geometry kernel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    /// No wire was given.
    EmptyInput,

    /// A wire is open, or too small to bound a face.
    DegenerateWire(usize),

    /// Two wires cross each other.
    IntersectingWires(usize, usize),

    /// A loop lies inside a hole.
    NestedIslands(usize),

    /// No face could be built.
    NoFaces,
}

impl fmt::Display for KernelError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            KernelError::EmptyInput => write!(fmt, "no wire to build faces from"),
            KernelError::DegenerateWire(i) => write!(fmt, "wire #{} cannot bound a face", i),
            KernelError::IntersectingWires(i, j) => {
                write!(fmt, "wires #{} and #{} intersect", i, j)
            }
            KernelError::NestedIslands(i) => write!(fmt, "wire #{} is an island in a hole", i),
            KernelError::NoFaces => write!(fmt, "no face could be built"),
        }
    }
}

impl error::Error for KernelError {}

/// The result type of kernel operations.
pub type KernelResult<T> = result::Result<T, KernelError>;

/// The operations the layout engine needs from a solid modeler.
pub trait ShapeKernel {
    /// Builds faces from closed wires with the given strategy.
    fn make_faces(&self, wires: &[Wire], maker: FaceMaker) -> KernelResult<Vec<Face>>;

    /// Unions overlapping faces into the smallest set of faces.
    fn fuse(&self, faces: &[Face]) -> KernelResult<Vec<Face>>;
}

/// A kernel working on the planar polygons of this crate.
#[derive(Debug, Default, Copy, Clone)]
pub struct PlanarKernel;

/// Where a loop stands relatively to another one.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Containment {
    Inside,
    Outside,
    Crossing,
}

/// Locates the vertices of `inner` with respect to `outer`.
fn containment(inner: &Wire, outer: &Wire) -> Containment {
    let inside = inner.points.iter().filter(|p| outer.contains(**p)).count();
    if inside == inner.points.len() {
        Containment::Inside
    } else if inside == 0 {
        Containment::Outside
    } else {
        Containment::Crossing
    }
}

/// Whether the segments `[a, b]` and `[c, d]` properly cross.
fn segments_cross(a: Point, b: Point, c: Point, d: Point) -> bool {
    let d1 = (b - a).cross(c - a);
    let d2 = (b - a).cross(d - a);
    let d3 = (d - c).cross(a - c);
    let d4 = (d - c).cross(b - c);
    ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
}

/// Whether the outlines of two wires cross.
fn wires_cross(a: &Wire, b: &Wire) -> bool {
    if !a.bounding_box().intersects(&b.bounding_box()) {
        return false;
    }

    a.segments()
        .any(|(p, q)| b.segments().any(|(r, s)| segments_cross(p, q, r, s)))
}

/// A loop with its position in the nesting tree.
struct Nested {
    /// Index of the wire in the input.
    index: usize,

    /// Index (in the sorted list) of the smallest loop containing this one.
    parent: Option<usize>,

    /// Number of loops containing this one.
    depth: usize,
}

impl PlanarKernel {
    /// Checks that every wire can bound a face.
    fn validate(wires: &[Wire]) -> KernelResult<()> {
        if wires.is_empty() {
            return Err(KernelError::EmptyInput);
        }

        match wires.iter().position(|w| !w.closed || w.is_degenerate()) {
            Some(i) => Err(KernelError::DegenerateWire(i)),
            None => Ok(()),
        }
    }

    /// Sorts the loops from the largest to the smallest and finds how they nest.
    ///
    /// With `strict`, loops that partially overlap are rejected. Otherwise the
    /// first vertex of a loop decides whether it is inside another one.
    fn nest(wires: &[Wire], strict: bool) -> KernelResult<Vec<Nested>> {
        let mut order: Vec<usize> = (0..wires.len()).collect();
        order.sort_by(|&i, &j| {
            let (a, b) = (wires[i].signed_area().abs(), wires[j].signed_area().abs());
            b.partial_cmp(&a).unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut nested: Vec<Nested> = Vec::with_capacity(order.len());

        for &index in &order {
            let wire = &wires[index];
            let mut parent = None;

            for (candidate_position, candidate) in nested.iter().enumerate() {
                let outer = &wires[candidate.index];
                let inside = if strict {
                    if wires_cross(wire, outer) {
                        return Err(KernelError::IntersectingWires(candidate.index, index));
                    }
                    match containment(wire, outer) {
                        Containment::Inside => true,
                        Containment::Outside => false,
                        Containment::Crossing => {
                            return Err(KernelError::IntersectingWires(candidate.index, index))
                        }
                    }
                } else {
                    outer.contains(wire.points[0])
                };

                // Candidates come from the largest to the smallest, the last
                // container found is the tightest one.
                if inside {
                    parent = Some(candidate_position);
                }
            }

            let depth = parent.map(|p| nested[p].depth + 1).unwrap_or(0);
            nested.push(Nested {
                index,
                parent,
                depth,
            });
        }

        Ok(nested)
    }

    /// Builds faces from a nesting tree: even depths are material, odd depths holes.
    fn faces_from_nesting(wires: &[Wire], nested: &[Nested]) -> Vec<Face> {
        let mut faces: Vec<Face> = vec![];
        let mut face_of = vec![None; nested.len()];

        for (position, node) in nested.iter().enumerate() {
            let wire = &wires[node.index];
            if node.depth % 2 == 0 {
                face_of[position] = Some(faces.len());
                faces.push(Face::new(wire, &[]));
            } else if let Some(face) = node.parent.and_then(|p| face_of[p]) {
                faces[face].boundaries.push(wire.oriented(false));
            }
        }

        faces
    }

    fn bullseye(wires: &[Wire]) -> KernelResult<Vec<Face>> {
        Self::validate(wires)?;
        let nested = Self::nest(wires, true)?;
        Ok(Self::faces_from_nesting(wires, &nested))
    }

    fn cheese(wires: &[Wire]) -> KernelResult<Vec<Face>> {
        Self::validate(wires)?;
        let nested = Self::nest(wires, false)?;
        if let Some(island) = nested.iter().find(|n| n.depth > 1) {
            return Err(KernelError::NestedIslands(island.index));
        }
        Ok(Self::faces_from_nesting(wires, &nested))
    }

    fn simple(wires: &[Wire]) -> KernelResult<Vec<Face>> {
        if wires.is_empty() {
            return Err(KernelError::EmptyInput);
        }

        let faces: Vec<Face> = wires
            .iter()
            .filter(|w| w.closed && !w.is_degenerate())
            .map(|w| Face::new(w, &[]))
            .collect();

        if faces.is_empty() {
            Err(KernelError::NoFaces)
        } else {
            Ok(faces)
        }
    }
}

/// Whether the regions of two faces share some area.
fn faces_overlap(a: &Face, b: &Face) -> bool {
    if !a.bounding_box().intersects(&b.bounding_box()) {
        return false;
    }

    let crossing = a
        .boundaries
        .iter()
        .any(|p| b.boundaries.iter().any(|q| wires_cross(p, q)));

    crossing
        || b.boundaries.iter().any(|w| w.points.iter().any(|p| a.contains(*p)))
        || a.boundaries.iter().any(|w| w.points.iter().any(|p| b.contains(*p)))
}

/// Finds the representative of a group.
fn find(groups: &mut [usize], i: usize) -> usize {
    let mut root = i;
    while groups[root] != root {
        root = groups[root];
    }
    groups[i] = root;
    root
}

impl ShapeKernel for PlanarKernel {
    fn make_faces(&self, wires: &[Wire], maker: FaceMaker) -> KernelResult<Vec<Face>> {
        match maker {
            FaceMaker::Bullseye => Self::bullseye(wires),
            FaceMaker::Cheese => Self::cheese(wires),
            FaceMaker::Simple => Self::simple(wires),
        }
    }

    /// Groups faces that overlap, directly or through other faces, and
    /// concatenates the boundaries of each group.
    ///
    /// Since every face is front facing, the non zero winding region of the
    /// concatenated boundaries is the union of the group.
    fn fuse(&self, faces: &[Face]) -> KernelResult<Vec<Face>> {
        if faces.is_empty() {
            return Err(KernelError::EmptyInput);
        }

        let mut groups: Vec<usize> = (0..faces.len()).collect();
        for i in 0..faces.len() {
            for j in (i + 1)..faces.len() {
                if faces_overlap(&faces[i], &faces[j]) {
                    let (ri, rj) = (find(&mut groups, i), find(&mut groups, j));
                    if ri != rj {
                        groups[ri.max(rj)] = ri.min(rj);
                    }
                }
            }
        }

        let mut fused: Vec<(usize, Face)> = vec![];
        for (i, face) in faces.iter().enumerate() {
            let root = find(&mut groups, i);
            match fused.iter_mut().find(|(r, _)| *r == root) {
                Some((_, group)) => group.boundaries.extend(face.boundaries.iter().cloned()),
                None => fused.push((root, face.clone())),
            }
        }

        Ok(fused.into_iter().map(|(_, face)| face).collect())
    }
}
