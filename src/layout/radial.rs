//! Strings around a circular arc.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geometry::shapes::{Compound, Shape};
use crate::geometry::{Point, Transform, Transformable};
use crate::layout::StringPlacer;
use crate::units::{Angle, Length};

/// The way successive strings go around the arc.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RotationDirection {
    /// Increasing angles.
    CounterClockwise,

    /// Decreasing angles.
    Clockwise,
}

impl RotationDirection {
    /// The sign applied to the angle step.
    pub fn sign(self) -> f64 {
        match self {
            RotationDirection::CounterClockwise => 1.0,
            RotationDirection::Clockwise => -1.0,
        }
    }
}

impl Default for RotationDirection {
    fn default() -> RotationDirection {
        RotationDirection::CounterClockwise
    }
}

/// Anything but `Clockwise` is counter clockwise.
impl FromStr for RotationDirection {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<RotationDirection, Infallible> {
        match s.trim() {
            "Clockwise" => Ok(RotationDirection::Clockwise),
            _ => Ok(RotationDirection::CounterClockwise),
        }
    }
}

impl fmt::Display for RotationDirection {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RotationDirection::CounterClockwise => write!(fmt, "CounterClockwise"),
            RotationDirection::Clockwise => write!(fmt, "Clockwise"),
        }
    }
}

impl_string_serde!(RotationDirection);

fn default_radius() -> Length {
    Length(50.0)
}

fn default_angle_step() -> Angle {
    Angle(30.0)
}

fn default_true() -> bool {
    true
}

/// The properties of a radial layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadialLayout {
    /// The radius of the arc.
    #[serde(default = "default_radius")]
    pub radius: Length,

    /// The angle of the first string.
    #[serde(default)]
    pub start_angle: Angle,

    /// The angle between two successive strings.
    #[serde(default = "default_angle_step")]
    pub angle_step: Angle,

    /// Whether the baselines are tangent to the arc.
    #[serde(default = "default_true")]
    pub tangential: bool,

    /// The way successive strings go around the arc.
    #[serde(default)]
    pub rotation_direction: RotationDirection,

    /// An extra rotation applied to every string.
    #[serde(default)]
    pub string_rotation: Angle,
}

impl Default for RadialLayout {
    fn default() -> RadialLayout {
        RadialLayout {
            radius: default_radius(),
            start_angle: Angle(0.0),
            angle_step: default_angle_step(),
            tangential: true,
            rotation_direction: RotationDirection::CounterClockwise,
            string_rotation: Angle(0.0),
        }
    }
}

impl RadialLayout {
    /// The angle, in degrees, of the string at `index`.
    pub fn angle(&self, index: usize) -> f64 {
        self.start_angle.degrees()
            + index as f64 * self.angle_step.degrees() * self.rotation_direction.sign()
    }

    /// The transform moving the string at `index` to its slot.
    ///
    /// Tangential baselines are rotated by `angle - 90°` whatever the
    /// rotation direction.
    pub fn transform(&self, index: usize) -> Transform {
        let angle = self.angle(index);
        let rotation = if self.tangential { angle - 90.0 } else { 0.0 };
        let rotation = rotation + self.string_rotation.degrees();

        let radians = angle.to_radians();
        let position = Point::new(radians.cos(), radians.sin()) * self.radius.mm();

        Transform::rotation(rotation).then(&Transform::translation(position))
    }

    /// Creates a placer for this layout.
    pub fn placer(&self) -> RadialPlacer {
        RadialPlacer {
            layout: self.clone(),
        }
    }
}

/// Places each string at its own angle.
#[derive(Debug, Clone)]
pub struct RadialPlacer {
    layout: RadialLayout,
}

impl StringPlacer for RadialPlacer {
    fn place(&mut self, index: usize, shapes: Vec<Shape>) -> Vec<Shape> {
        Compound::new(shapes)
            .transformed(&self.layout.transform(index))
            .into_shapes()
    }
}
