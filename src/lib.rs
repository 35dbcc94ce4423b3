//! This crate lays out strings as CAD geometry: glyph outlines, optionally
//! filled, arranged along a line or around an arc.

#![warn(missing_docs)]

#[macro_use]
extern crate log;

/// Implements serde for a type through its `Display` and `FromStr` impls.
macro_rules! impl_string_serde {
    ($type: ty) => {
        impl serde::Serialize for $type {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'a> serde::Deserialize<'a> for $type {
            fn deserialize<D: serde::Deserializer<'a>>(
                deserializer: D,
            ) -> std::result::Result<$type, D::Error> {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

pub mod config;
pub mod document;
pub mod fonts;
pub mod geometry;
pub mod layout;
pub mod typography;
pub mod units;
pub mod warning;

#[cfg(test)]
mod tests;

use std::path::PathBuf;
use std::{error, fmt, io, result};

macro_rules! impl_from_error {
    ($type: ty, $variant: path, $from: ty) => {
        impl From<$from> for $type {
            fn from(e: $from) -> $type {
                $variant(e)
            }
        }
    };
}

/// The error type of the library.
#[derive(Debug)]
pub enum Error {
    /// Cannot read current directory.
    CannotReadCurrentDir,

    /// No shapestrings.toml was found.
    NoConfigFile,

    /// Error while dealing with freetype.
    FreetypeError(freetype::Error),

    /// Error while dealing with printpdf.
    PrintpdfError(printpdf::errors::Error),

    /// The specified font was not found.
    FontNotFound(PathBuf),

    /// The configuration file could not be read.
    ConfigError(toml::de::Error),

    /// The configuration could not be written.
    ConfigWriteError(toml::ser::Error),

    /// Another io error occured.
    IoError(io::Error),
}

impl_from_error!(Error, Error::FreetypeError, freetype::Error);
impl_from_error!(Error, Error::PrintpdfError, printpdf::errors::Error);
impl_from_error!(Error, Error::ConfigError, toml::de::Error);
impl_from_error!(Error, Error::ConfigWriteError, toml::ser::Error);
impl_from_error!(Error, Error::IoError, io::Error);

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::CannotReadCurrentDir => write!(fmt, "cannot read current directory"),
            Error::NoConfigFile => write!(fmt, "no shapestrings.toml was found"),
            Error::FreetypeError(e) => write!(fmt, "freetype error: {}", e),
            Error::PrintpdfError(e) => write!(fmt, "printpdf error: {}", e),
            Error::FontNotFound(path) => write!(fmt, "couldn't find font \"{}\"", path.display()),
            Error::ConfigError(e) => write!(fmt, "invalid configuration: {}", e),
            Error::ConfigWriteError(e) => write!(fmt, "cannot write configuration: {}", e),
            Error::IoError(e) => write!(fmt, "an io error occured: {}", e),
        }
    }
}

impl error::Error for Error {}

/// The result type of the library.
pub type Result<T> = result::Result<T, Error>;
