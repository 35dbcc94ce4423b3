//! Planar geometry: points, affine transforms and the shapes built from them.
//!
//! Every shape lives in the XY plane of the owning object, with Z = 0.

pub mod bbox;
pub mod kernel;
pub mod shapes;

use std::ops::{Add, Mul, Neg, Sub};

/// Tolerance under which lengths and areas are considered null.
pub const NEAR_ZERO: f64 = 1e-9;

/// A point (or a displacement vector) of the plane.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Point {
    /// The x coordinate.
    pub x: f64,

    /// The y coordinate.
    pub y: f64,
}

impl Point {
    /// The origin.
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    /// Creates a new point.
    pub const fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    /// Euclidean length of the vector from the origin to this point.
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Cross product of two vectors, i.e. the Z component of their 3D cross product.
    pub fn cross(self, other: Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Whether two points coincide within `tolerance`.
    pub fn is_near(self, other: Point, tolerance: f64) -> bool {
        (self - other).length() <= tolerance
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// An affine transform of the plane.
///
/// A point `(x, y)` is mapped to
/// `(txx * x + txy * y + tx, tyx * x + tyy * y + ty)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    /// Translation along x.
    pub tx: f64,

    /// Translation along y.
    pub ty: f64,

    /// Contribution of x to x.
    pub txx: f64,

    /// Contribution of y to x.
    pub txy: f64,

    /// Contribution of x to y.
    pub tyx: f64,

    /// Contribution of y to y.
    pub tyy: f64,
}

impl Default for Transform {
    fn default() -> Transform {
        Transform::IDENTITY
    }
}

impl Transform {
    /// The transform that leaves everything in place.
    pub const IDENTITY: Transform = Transform {
        tx: 0.0,
        ty: 0.0,
        txx: 1.0,
        txy: 0.0,
        tyx: 0.0,
        tyy: 1.0,
    };

    /// A translation by `offset`.
    pub fn translation(offset: Point) -> Transform {
        Transform {
            tx: offset.x,
            ty: offset.y,
            ..Transform::IDENTITY
        }
    }

    /// A uniform scale about the origin.
    pub fn scaling(factor: f64) -> Transform {
        Transform {
            txx: factor,
            tyy: factor,
            ..Transform::IDENTITY
        }
    }

    /// A counter clockwise rotation about the origin, in degrees.
    pub fn rotation(degrees: f64) -> Transform {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Transform {
            txx: cos,
            txy: -sin,
            tyx: sin,
            tyy: cos,
            ..Transform::IDENTITY
        }
    }

    /// A horizontal shear: x is displaced by `factor * y`.
    pub fn shear_x(factor: f64) -> Transform {
        Transform {
            txy: factor,
            ..Transform::IDENTITY
        }
    }

    /// Composes two transforms: `self` is applied first, then `next`.
    pub fn then(&self, next: &Transform) -> Transform {
        Transform {
            txx: next.txx * self.txx + next.txy * self.tyx,
            txy: next.txx * self.txy + next.txy * self.tyy,
            tyx: next.tyx * self.txx + next.tyy * self.tyx,
            tyy: next.tyx * self.txy + next.tyy * self.tyy,
            tx: next.txx * self.tx + next.txy * self.ty + next.tx,
            ty: next.tyx * self.tx + next.tyy * self.ty + next.ty,
        }
    }

    /// Determinant of the linear part. Negative for mirroring transforms.
    pub fn determinant(&self) -> f64 {
        self.txx * self.tyy - self.txy * self.tyx
    }

    /// Applies the transform to a point.
    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.txx * p.x + self.txy * p.y + self.tx,
            self.tyx * p.x + self.tyy * p.y + self.ty,
        )
    }
}

/// A value that can be moved by an affine [`Transform`].
pub trait Transformable {
    /// Applies a transform, returning the transformed value.
    #[must_use]
    fn transformed(&self, t: &Transform) -> Self;

    /// Translates by `offset`.
    #[must_use]
    fn translated(&self, offset: Point) -> Self
    where
        Self: Sized,
    {
        self.transformed(&Transform::translation(offset))
    }
}

impl Transformable for Point {
    #[inline]
    fn transformed(&self, t: &Transform) -> Point {
        t.apply(*self)
    }
}
