//! This module contains everything related to the non fatal problems of a
//! render pass.
//!
//! Warnings never abort a pass: the pass degrades, and the warnings tell the
//! user what was left out.

use std::fmt;

use colored::*;

/// The different types of warning that can occur.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WarningType {
    /// The oblique angle is outside of the -80 to +80 degree range.
    ObliqueAngleOutOfRange,

    /// A string could not be turned into wires.
    StringHasNoWires,

    /// No face could be built for one character.
    FaceCreationFailed,

    /// The whole pass produced nothing.
    StringsHaveNoWires,

    /// No font file was given.
    MissingFontFile,
}

impl WarningType {
    /// Returns the title of the warning.
    pub fn title(self) -> &'static str {
        match self {
            WarningType::ObliqueAngleOutOfRange => {
                "oblique angle must be in the -80 to +80 degree range"
            }
            WarningType::StringHasNoWires => "string has no wires",
            WarningType::FaceCreationFailed => "face creation failed for one character",
            WarningType::StringsHaveNoWires => "strings have no wires",
            WarningType::MissingFontFile => "no font file",
        }
    }

    /// Returns the detail of the warning.
    pub fn detail(self) -> &'static str {
        match self {
            WarningType::ObliqueAngleOutOfRange => "the string is left unslanted",
            WarningType::StringHasNoWires => "this string will be skipped",
            WarningType::FaceCreationFailed => "this character will be left out",
            WarningType::StringsHaveNoWires => "the shape is left unset",
            WarningType::MissingFontFile => "nothing will be generated",
        }
    }

    /// Returns a potential note.
    pub fn note(self) -> Option<&'static str> {
        match self {
            WarningType::FaceCreationFailed => {
                Some("the outline of this character may not be closed, try disabling MakeFace")
            }
            WarningType::MissingFontFile => {
                Some("set the FontFile property to a .ttf or .otf file")
            }
            _ => None,
        }
    }
}

/// A warning emitted by a shape string object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// The type of the warning.
    pub ty: WarningType,

    /// The kind of object that emitted the warning.
    pub object: &'static str,

    /// What the warning is about, e.g. the string being rendered.
    pub context: Option<String>,
}

impl Warning {
    /// Creates a warning and logs it.
    pub fn emit(ty: WarningType, object: &'static str, context: Option<String>) -> Warning {
        match &context {
            Some(context) => warn!("{}: {} ({})", object, ty.title(), context),
            None => warn!("{}: {}", object, ty.title()),
        }

        Warning {
            ty,
            object,
            context,
        }
    }
}

/// A struct that contains the warnings of a render pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Warnings {
    /// The warnings produced.
    pub warnings: Vec<Warning>,
}

impl Warnings {
    /// Creates an empty collection.
    pub fn new() -> Warnings {
        Warnings { warnings: vec![] }
    }

    /// Emits a warning and keeps it.
    pub fn push(&mut self, ty: WarningType, object: &'static str, context: Option<String>) {
        self.warnings.push(Warning::emit(ty, object, context));
    }

    /// Whether no warning was produced.
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Number of warnings.
    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    /// Whether a warning of the given type was produced.
    pub fn contains(&self, ty: WarningType) -> bool {
        self.warnings.iter().any(|w| w.ty == ty)
    }

    /// Counts the warnings of the given type.
    pub fn count(&self, ty: WarningType) -> usize {
        self.warnings.iter().filter(|w| w.ty == ty).count()
    }
}

impl fmt::Display for Warnings {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        for warning in &self.warnings {
            writeln!(
                fmt,
                "{}{}",
                "warning: ".bold().yellow(),
                warning.ty.title().bold()
            )?;

            match &warning.context {
                Some(context) => writeln!(
                    fmt,
                    " {} {}: {}",
                    "-->".bold().blue(),
                    warning.object,
                    context
                )?,
                None => writeln!(fmt, " {} {}", "-->".bold().blue(), warning.object)?,
            }

            writeln!(fmt, "  {}", "|".blue().bold())?;
            writeln!(
                fmt,
                "  {} {}",
                "|".blue().bold(),
                warning.ty.detail().bold().yellow()
            )?;
            writeln!(fmt, "  {}", "|".blue().bold())?;

            if let Some(note) = warning.ty.note() {
                writeln!(fmt, "  {} {}{}", "=".blue().bold(), "note: ".bold(), note)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::warning::{WarningType, Warnings};

    #[test]
    fn display_lists_every_warning() {
        colored::control::set_override(false);

        let mut warnings = Warnings::new();
        warnings.push(
            WarningType::FaceCreationFailed,
            "SpacedShapeString",
            Some("character 'A' of \"AB\"".into()),
        );
        warnings.push(WarningType::StringsHaveNoWires, "SpacedShapeString", None);

        let text = warnings.to_string();
        assert!(text.contains("warning: face creation failed for one character"));
        assert!(text.contains("--> SpacedShapeString: character 'A' of \"AB\""));
        assert!(text.contains("note: the outline of this character may not be closed"));
        assert!(text.contains("warning: strings have no wires"));
        assert_eq!(warnings.count(WarningType::FaceCreationFailed), 1);
        assert!(!warnings.contains(WarningType::MissingFontFile));
    }
}
