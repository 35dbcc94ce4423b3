//! This module contains everything that turns text into glyph outlines.

pub mod outline;

use std::path::Path;

use crate::geometry::shapes::Wire;
use crate::Result;

/// The outline loops of a single character. Blank characters have none.
pub type CharacterWires = Vec<Wire>;

/// Turns a string into glyph outlines.
///
/// The outlines of every character are positioned along the X axis, with
/// the baseline of the text on Y = 0.
pub trait GlyphRasterizer {
    /// Returns one group of wires per character of `text`.
    ///
    /// `size` is the height of the font and `tracking` the extra space added
    /// after each character, both in millimetres.
    fn rasterize(
        &self,
        text: &str,
        font_file: &Path,
        size: f64,
        tracking: f64,
    ) -> Result<Vec<CharacterWires>>;
}
