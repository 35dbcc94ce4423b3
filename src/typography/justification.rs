//! Alignment of a rendered string around its insertion point.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::geometry::bbox::BoundingBox;
use crate::geometry::Point;

/// Vertical alignment of a string.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VerticalAlignment {
    /// The top of the reference height is on the insertion point.
    Top,

    /// The middle of the reference height is on the insertion point.
    Middle,

    /// The baseline (or the bottom of the shape) is on the insertion point.
    Bottom,
}

/// Horizontal alignment of a string.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HorizontalAlignment {
    /// The string starts at the insertion point.
    Left,

    /// The string is centered on the insertion point.
    Center,

    /// The string ends at the insertion point.
    Right,
}

/// One of the nine alignments of a string, e.g. `Middle-Center`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Justification {
    /// The vertical alignment.
    pub vertical: VerticalAlignment,

    /// The horizontal alignment.
    pub horizontal: HorizontalAlignment,
}

impl Justification {
    /// Creates a justification.
    pub const fn new(
        vertical: VerticalAlignment,
        horizontal: HorizontalAlignment,
    ) -> Justification {
        Justification {
            vertical,
            horizontal,
        }
    }

    /// `Bottom-Left`, the default of strings laid out in a line.
    pub const BOTTOM_LEFT: Justification =
        Justification::new(VerticalAlignment::Bottom, HorizontalAlignment::Left);

    /// `Middle-Center`, the default of strings laid out around an arc.
    pub const MIDDLE_CENTER: Justification =
        Justification::new(VerticalAlignment::Middle, HorizontalAlignment::Center);
}

impl Default for Justification {
    fn default() -> Justification {
        Justification::BOTTOM_LEFT
    }
}

/// Reads a justification from its display name.
///
/// Unknown names fall back to `Bottom` and `Left` for the parts they miss.
impl FromStr for Justification {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Justification, Infallible> {
        let vertical = if s.contains("Top") {
            VerticalAlignment::Top
        } else if s.contains("Middle") {
            VerticalAlignment::Middle
        } else {
            VerticalAlignment::Bottom
        };

        let horizontal = if s.contains("Right") {
            HorizontalAlignment::Right
        } else if s.contains("Center") {
            HorizontalAlignment::Center
        } else {
            HorizontalAlignment::Left
        };

        Ok(Justification::new(vertical, horizontal))
    }
}

impl fmt::Display for Justification {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let vertical = match self.vertical {
            VerticalAlignment::Top => "Top",
            VerticalAlignment::Middle => "Middle",
            VerticalAlignment::Bottom => "Bottom",
        };
        let horizontal = match self.horizontal {
            HorizontalAlignment::Left => "Left",
            HorizontalAlignment::Center => "Center",
            HorizontalAlignment::Right => "Right",
        };
        write!(fmt, "{}-{}", vertical, horizontal)
    }
}

/// Where the height used for vertical alignment comes from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum JustificationReference {
    /// The cap height shared by every string of the object.
    CapHeight,

    /// The height of each string's own shape.
    ShapeHeight,
}

impl Default for JustificationReference {
    fn default() -> JustificationReference {
        JustificationReference::CapHeight
    }
}

impl FromStr for JustificationReference {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<JustificationReference, Infallible> {
        if s.contains("Shape") {
            Ok(JustificationReference::ShapeHeight)
        } else {
            Ok(JustificationReference::CapHeight)
        }
    }
}

impl fmt::Display for JustificationReference {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            JustificationReference::CapHeight => write!(fmt, "Cap Height"),
            JustificationReference::ShapeHeight => write!(fmt, "Shape Height"),
        }
    }
}

impl_string_serde!(Justification);
impl_string_serde!(JustificationReference);

/// Computes the translation that justifies a string whose shape has the
/// bounding box `bbox`.
///
/// The leading bearing of the string is trimmed, unless the string is left
/// aligned and `keep_left_margin` is set.
pub fn justification_offset(
    bbox: &BoundingBox,
    cap_height: f64,
    justification: Justification,
    reference: JustificationReference,
    keep_left_margin: bool,
) -> Point {
    let mut offset =
        if keep_left_margin && justification.horizontal == HorizontalAlignment::Left {
            Point::ZERO
        } else {
            Point::new(-bbox.x_min, 0.0)
        };

    let height = match reference {
        JustificationReference::ShapeHeight => {
            offset.y -= bbox.y_min;
            bbox.y_length()
        }
        JustificationReference::CapHeight => cap_height,
    };

    match justification.vertical {
        VerticalAlignment::Top => offset.y -= height,
        VerticalAlignment::Middle => offset.y -= height / 2.0,
        VerticalAlignment::Bottom => (),
    }

    match justification.horizontal {
        HorizontalAlignment::Right => offset.x -= bbox.x_length(),
        HorizontalAlignment::Center => offset.x -= bbox.x_length() / 2.0,
        HorizontalAlignment::Left => (),
    }

    offset
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use crate::geometry::bbox::BoundingBox;
    use crate::geometry::Point;
    use crate::typography::justification::{
        justification_offset, Justification, JustificationReference,
    };

    fn sample_box() -> BoundingBox {
        BoundingBox {
            x_min: 1.0,
            y_min: -2.0,
            x_max: 11.0,
            y_max: 8.0,
        }
    }

    #[test_case("Top-Left", -1.0, -7.0 ; "top left")]
    #[test_case("Top-Center", -6.0, -7.0 ; "top center")]
    #[test_case("Top-Right", -11.0, -7.0 ; "top right")]
    #[test_case("Middle-Left", -1.0, -3.5 ; "middle left")]
    #[test_case("Middle-Center", -6.0, -3.5 ; "middle center")]
    #[test_case("Middle-Right", -11.0, -3.5 ; "middle right")]
    #[test_case("Bottom-Left", -1.0, 0.0 ; "bottom left")]
    #[test_case("Bottom-Center", -6.0, 0.0 ; "bottom center")]
    #[test_case("Bottom-Right", -11.0, 0.0 ; "bottom right")]
    fn cap_height_offsets(name: &str, x: f64, y: f64) {
        let justification: Justification = name.parse().unwrap();
        assert_eq!(justification.to_string(), name);

        let offset = justification_offset(
            &sample_box(),
            7.0,
            justification,
            JustificationReference::CapHeight,
            false,
        );
        assert_eq!(offset, Point::new(x, y));
    }

    #[test_case("Top-Right", -11.0, -8.0 ; "top right")]
    #[test_case("Middle-Center", -6.0, -3.0 ; "middle center")]
    #[test_case("Bottom-Left", -1.0, 2.0 ; "bottom left")]
    fn shape_height_offsets(name: &str, x: f64, y: f64) {
        let offset = justification_offset(
            &sample_box(),
            7.0,
            name.parse().unwrap(),
            JustificationReference::ShapeHeight,
            false,
        );
        assert_eq!(offset, Point::new(x, y));
    }

    #[test]
    fn keep_left_margin_only_when_left_aligned() {
        let bbox = sample_box();
        let reference = JustificationReference::CapHeight;

        let left = justification_offset(&bbox, 7.0, Justification::BOTTOM_LEFT, reference, true);
        assert_eq!(left, Point::ZERO);

        let center = "Bottom-Center".parse().unwrap();
        let center = justification_offset(&bbox, 7.0, center, reference, true);
        assert_eq!(center, Point::new(-6.0, 0.0));
    }

    #[test]
    fn malformed_names_fall_back_to_bottom_left() {
        let justification: Justification = "Sideways".parse().unwrap();
        assert_eq!(justification, Justification::BOTTOM_LEFT);

        let reference: JustificationReference = "whatever".parse().unwrap();
        assert_eq!(reference, JustificationReference::CapHeight);
        let reference: JustificationReference = "Shape Height".parse().unwrap();
        assert_eq!(reference, JustificationReference::ShapeHeight);
    }

    #[test]
    fn centering_twice_does_not_move() {
        let bbox = sample_box();
        let justification = Justification::MIDDLE_CENTER;
        let reference = JustificationReference::ShapeHeight;

        let first = justification_offset(&bbox, 7.0, justification, reference, false);
        let moved = BoundingBox {
            x_min: bbox.x_min + first.x,
            y_min: bbox.y_min + first.y,
            x_max: bbox.x_max + first.x,
            y_max: bbox.y_max + first.y,
        };
        let second = justification_offset(&moved, 7.0, justification, reference, false);
        assert_eq!(second, Point::ZERO);
    }
}
