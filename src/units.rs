//! Length and angle quantities used by shape string properties.
//!
//! Lengths are stored in millimetres and angles in degrees, which are the
//! internal units of the host CAD application. Both can be read from a bare
//! number or from a quantity string such as `"10 mm"`, `"1 in"` or
//! `"30 deg"`.
use std::ops::{Add, AddAssign, Mul, Neg, Sub};
use std::str::FromStr;
use std::{f64, fmt, result};

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Millimetres in an inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Typographic points in an inch.
pub const PT_PER_INCH: f64 = 72.0;

/// A length, in millimetres.
#[derive(Copy, Clone, Default, PartialEq, PartialOrd)]
pub struct Length(pub f64);

/// An angle, in degrees.
#[derive(Copy, Clone, Default, PartialEq, PartialOrd)]
pub struct Angle(pub f64);

/// The error produced when a quantity string cannot be understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityError(pub String);

impl fmt::Display for QuantityError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "cannot read quantity \"{}\"", self.0)
    }
}

impl std::error::Error for QuantityError {}

impl Length {
    /// Returns the value in millimetres.
    pub fn mm(self) -> f64 {
        self.0
    }
}

impl Angle {
    /// Returns the value in degrees.
    pub fn degrees(self) -> f64 {
        self.0
    }

    /// Returns the value in radians.
    pub fn radians(self) -> f64 {
        self.0.to_radians()
    }
}

impl fmt::Debug for Length {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} mm", self.0)
    }
}

impl fmt::Debug for Angle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} deg", self.0)
    }
}

macro_rules! impl_operators {
    ($the_type: ty, $constructor: expr) => {
        impl Add for $the_type {
            type Output = $the_type;

            fn add(self, other: $the_type) -> $the_type {
                $constructor(self.0 + other.0)
            }
        }

        impl AddAssign for $the_type {
            fn add_assign(&mut self, other: $the_type) {
                self.0 += other.0;
            }
        }

        impl Sub for $the_type {
            type Output = $the_type;

            fn sub(self, other: $the_type) -> $the_type {
                $constructor(self.0 - other.0)
            }
        }

        impl Neg for $the_type {
            type Output = $the_type;

            fn neg(self) -> $the_type {
                $constructor(-self.0)
            }
        }

        impl Mul<f64> for $the_type {
            type Output = $the_type;

            fn mul(self, rhs: f64) -> $the_type {
                $constructor(self.0 * rhs)
            }
        }
    };
}

impl_operators!(Length, Length);
impl_operators!(Angle, Angle);

/// Splits a quantity string into its number and its (trimmed) unit.
fn split_quantity(input: &str) -> result::Result<(f64, &str), QuantityError> {
    let input = input.trim();
    let mut previous = None;
    let split = input
        .char_indices()
        .find(|&(i, c)| {
            // Signs lead the number or its exponent.
            let sign = (c == '-' || c == '+')
                && (i == 0 || previous == Some('e') || previous == Some('E'));
            previous = Some(c);
            !(c.is_ascii_digit() || c == '.' || c == 'e' || c == 'E' || sign)
        })
        .map(|(i, _)| i)
        .unwrap_or_else(|| input.len());

    let (number, unit) = input.split_at(split);
    let value = number
        .trim()
        .parse::<f64>()
        .map_err(|_| QuantityError(input.to_owned()))?;

    Ok((value, unit.trim()))
}

impl FromStr for Length {
    type Err = QuantityError;

    fn from_str(s: &str) -> result::Result<Length, QuantityError> {
        let (value, unit) = split_quantity(s)?;
        let factor = match unit {
            "" | "mm" => 1.0,
            "cm" => 10.0,
            "m" => 1000.0,
            "in" | "\"" => MM_PER_INCH,
            "pt" => MM_PER_INCH / PT_PER_INCH,
            _ => return Err(QuantityError(s.to_owned())),
        };
        Ok(Length(value * factor))
    }
}

impl FromStr for Angle {
    type Err = QuantityError;

    fn from_str(s: &str) -> result::Result<Angle, QuantityError> {
        let (value, unit) = split_quantity(s)?;
        match unit {
            "" | "deg" | "°" => Ok(Angle(value)),
            "rad" => Ok(Angle(value.to_degrees())),
            _ => Err(QuantityError(s.to_owned())),
        }
    }
}

/// Serializes a `Length` as a plain number of millimetres.
// This is required to use in macro `serialize_with`.
#[allow(clippy::trivially_copy_pass_by_ref)]
pub fn serialize_length<S: Serializer>(
    length: &Length,
    serializer: S,
) -> result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(length.0)
}

/// Serializes an `Angle` as a plain number of degrees.
#[allow(clippy::trivially_copy_pass_by_ref)]
pub fn serialize_angle<S: Serializer>(
    angle: &Angle,
    serializer: S,
) -> result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(angle.0)
}

macro_rules! visit_from {
    ($visit: ident, $ty: ty, $constructor: expr) => {
        fn $visit<E>(self, value: $ty) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok($constructor(f64::from(value)))
        }
    };
}

macro_rules! visit_as {
    ($visit: ident, $ty: ty, $constructor: expr) => {
        fn $visit<E>(self, value: $ty) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok($constructor(value as f64))
        }
    };
}

macro_rules! quantity_visitor {
    ($visitor: ident, $ty: ty, $expecting: expr) => {
        /// Visitor accepting either a number or a quantity string.
        pub struct $visitor;

        impl<'a> Visitor<'a> for $visitor {
            type Value = $ty;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str($expecting)
            }

            visit_from!(visit_u8, u8, <$ty>::from_f64);
            visit_from!(visit_u16, u16, <$ty>::from_f64);
            visit_from!(visit_u32, u32, <$ty>::from_f64);
            visit_as!(visit_u64, u64, <$ty>::from_f64);
            visit_from!(visit_i8, i8, <$ty>::from_f64);
            visit_from!(visit_i16, i16, <$ty>::from_f64);
            visit_from!(visit_i32, i32, <$ty>::from_f64);
            visit_as!(visit_i64, i64, <$ty>::from_f64);
            visit_from!(visit_f32, f32, <$ty>::from_f64);
            visit_from!(visit_f64, f64, <$ty>::from_f64);

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                value.parse::<$ty>().map_err(E::custom)
            }
        }
    };
}

impl Length {
    fn from_f64(value: f64) -> Length {
        Length(value)
    }
}

impl Angle {
    fn from_f64(value: f64) -> Angle {
        Angle(value)
    }
}

quantity_visitor!(LengthVisitor, Length, "a length in mm or a quantity string");
quantity_visitor!(AngleVisitor, Angle, "an angle in degrees or a quantity string");

/// Deserializes a `Length` from a number or a quantity string.
pub fn deserialize_length<'a, D: Deserializer<'a>>(
    deserializer: D,
) -> result::Result<Length, D::Error> {
    deserializer.deserialize_any(LengthVisitor)
}

/// Deserializes an `Angle` from a number or a quantity string.
pub fn deserialize_angle<'a, D: Deserializer<'a>>(
    deserializer: D,
) -> result::Result<Angle, D::Error> {
    deserializer.deserialize_any(AngleVisitor)
}

impl Serialize for Length {
    fn serialize<S: Serializer>(&self, serializer: S) -> result::Result<S::Ok, S::Error> {
        serialize_length(self, serializer)
    }
}

impl<'a> Deserialize<'a> for Length {
    fn deserialize<D: Deserializer<'a>>(deserializer: D) -> result::Result<Length, D::Error> {
        deserialize_length(deserializer)
    }
}

impl Serialize for Angle {
    fn serialize<S: Serializer>(&self, serializer: S) -> result::Result<S::Ok, S::Error> {
        serialize_angle(self, serializer)
    }
}

impl<'a> Deserialize<'a> for Angle {
    fn deserialize<D: Deserializer<'a>>(deserializer: D) -> result::Result<Angle, D::Error> {
        deserialize_angle(deserializer)
    }
}

/// Compares two float numbers to check if they're close enough to be
/// considered equal.
///
/// # Examples
///
/// ```
/// # use shapestrings::units::nearly_equal;
/// assert_eq!(nearly_equal(3.0, 2.99999), true);
/// assert_eq!(nearly_equal(4.0, 3.999), false);
/// ```
pub fn nearly_equal(a: f64, b: f64) -> bool {
    let abs_a = a.abs();
    let abs_b = b.abs();
    let diff = (a - b).abs();

    if a == b {
        // Handle infinities.
        true
    } else if a == 0.0 || b == 0.0 || diff < f64::MIN_POSITIVE {
        // One of a or b is zero (or both are extremely close to it,) use absolute error.
        diff < (f64::EPSILON * f64::MIN_POSITIVE)
    } else {
        // Use relative error.
        (diff / f64::min(abs_a + abs_b, f64::MAX)) < 10e-5
    }
}

/// Relative closeness test, `|a - b| <= rel_tol * max(|a|, |b|)`.
pub fn is_close(a: f64, b: f64, rel_tol: f64) -> bool {
    a == b || (a - b).abs() <= rel_tol * f64::max(a.abs(), b.abs())
}
