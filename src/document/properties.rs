//! The persisted properties of a shape string object, by host name.

use std::fmt;

/// Every property a shape string object persists.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Property {
    /// The strings to render.
    Strings,
    /// The font file.
    FontFile,
    /// The cap height.
    Size,
    /// The space after each character.
    Tracking,
    /// The alignment of the strings.
    Justification,
    /// The height used for vertical alignment.
    JustificationReference,
    /// Whether the left bearing is kept.
    KeepLeftMargin,
    /// Whether strings are scaled to the size.
    ScaleToSize,
    /// The slant of the text.
    ObliqueAngle,
    /// Whether outlines are filled.
    MakeFace,
    /// Whether faces are fused.
    Fuse,
    /// The gap between strings of a linear layout.
    Offset,
    /// Whether string widths add to the gap.
    UseBoundingBox,
    /// The radius of a radial layout.
    Radius,
    /// The angle of the first string.
    StartAngle,
    /// The angle between strings.
    AngleStep,
    /// Whether baselines are tangent to the arc.
    Tangential,
    /// The way strings go around the arc.
    RotationDirection,
    /// The extra rotation of every string.
    StringRotation,
    /// Where the object is placed.
    Placement,
}

impl Property {
    /// Every property, in the order the host lists them.
    pub const ALL: [Property; 20] = [
        Property::Strings,
        Property::FontFile,
        Property::Size,
        Property::Tracking,
        Property::Justification,
        Property::JustificationReference,
        Property::KeepLeftMargin,
        Property::ScaleToSize,
        Property::ObliqueAngle,
        Property::MakeFace,
        Property::Fuse,
        Property::Offset,
        Property::UseBoundingBox,
        Property::Radius,
        Property::StartAngle,
        Property::AngleStep,
        Property::Tangential,
        Property::RotationDirection,
        Property::StringRotation,
        Property::Placement,
    ];

    /// The name of the property in the host.
    pub fn name(self) -> &'static str {
        match self {
            Property::Strings => "Strings",
            Property::FontFile => "FontFile",
            Property::Size => "Size",
            Property::Tracking => "Tracking",
            Property::Justification => "Justification",
            Property::JustificationReference => "JustificationReference",
            Property::KeepLeftMargin => "KeepLeftMargin",
            Property::ScaleToSize => "ScaleToSize",
            Property::ObliqueAngle => "ObliqueAngle",
            Property::MakeFace => "MakeFace",
            Property::Fuse => "Fuse",
            Property::Offset => "Offset",
            Property::UseBoundingBox => "UseBoundingBox",
            Property::Radius => "Radius",
            Property::StartAngle => "StartAngle",
            Property::AngleStep => "AngleStep",
            Property::Tangential => "Tangential",
            Property::RotationDirection => "RotationDirection",
            Property::StringRotation => "StringRotation",
            Property::Placement => "Placement",
        }
    }

    /// Finds a property from its host name.
    pub fn from_name(name: &str) -> Option<Property> {
        Property::ALL.iter().copied().find(|p| p.name() == name)
    }

    /// Whether changing the property requires the geometry to be rebuilt.
    ///
    /// Moving the object keeps its geometry.
    pub fn requires_regeneration(self) -> bool {
        self != Property::Placement
    }
}

impl fmt::Display for Property {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}", self.name())
    }
}

/// Whether a change of the property called `name` requires the geometry to
/// be rebuilt. Unknown properties are assumed to.
pub fn needs_regeneration(name: &str) -> bool {
    Property::from_name(name).map_or(true, Property::requires_regeneration)
}
