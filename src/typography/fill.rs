//! Filling glyph outlines with faces.
//!
//! Some fonts have outlines that do not close properly. Filling them gives
//! garbage, so a reference glyph is filled first and filling is abandoned
//! for the whole font when the result does not match its outline.

use std::path::Path;

use crate::fonts::GlyphRasterizer;
use crate::geometry::bbox::BoundingBox;
use crate::geometry::kernel::{FaceMaker, KernelError, ShapeKernel};
use crate::geometry::shapes::{Face, Wire};
use crate::units::is_close;

/// The glyph used to check whether a font can be filled.
pub const PROBE_GLYPH: &str = "L";

/// Minimal area of the filled probe glyph, rendered one unit high.
pub const PROBE_MIN_AREA: f64 = 0.03;

/// Relative tolerance between the diagonals of the probe outline and of its faces.
pub const PROBE_DIAGONAL_TOLERANCE: f64 = 1e-7;

/// What came out of filling one character.
#[derive(Debug, Clone, PartialEq)]
pub enum CharacterFaces {
    /// The faces of the character, all looking towards +Z.
    Faces(Vec<Face>),

    /// The character has wires, but none of them is closed.
    NoClosedWires,

    /// Every face maker failed, the error is the last one.
    Failed(KernelError),
}

/// Builds the faces of one character.
///
/// Open wires are discarded. The face makers of
/// [`FaceMaker::FALLBACK_CHAIN`] are tried in turn until one succeeds.
pub fn character_faces(kernel: &dyn ShapeKernel, character: &[Wire]) -> CharacterFaces {
    let loops: Vec<Wire> = character.iter().filter_map(Wire::to_loop).collect();

    if loops.is_empty() {
        return CharacterFaces::NoClosedWires;
    }

    let mut last_error = KernelError::NoFaces;

    for maker in FaceMaker::FALLBACK_CHAIN.iter() {
        match kernel.make_faces(&loops, *maker) {
            Ok(mut faces) => {
                for face in &mut faces {
                    // A face without a normal is kept as is.
                    if let Some(z) = face.normal_z() {
                        if z < 0.0 {
                            face.reverse();
                        }
                    }
                }
                return CharacterFaces::Faces(faces);
            }
            Err(e) => {
                debug!("{} face maker failed: {}", maker.name(), e);
                last_error = e;
            }
        }
    }

    CharacterFaces::Failed(last_error)
}

/// Checks whether the glyphs of a font can be filled reliably.
///
/// The reference glyph is rendered one unit high: filling is trusted if it
/// gives faces of a reasonable area that cover exactly the extent of the
/// outline.
pub fn font_fills_cleanly(
    rasterizer: &dyn GlyphRasterizer,
    kernel: &dyn ShapeKernel,
    font_file: &Path,
) -> bool {
    let character = match rasterizer.rasterize(PROBE_GLYPH, font_file, 1.0, 0.0) {
        Ok(mut characters) if !characters.is_empty() => characters.swap_remove(0),
        Ok(_) => return false,
        Err(e) => {
            debug!("cannot render the fill probe: {}", e);
            return false;
        }
    };

    let faces = match character_faces(kernel, &character) {
        CharacterFaces::Faces(faces) if !faces.is_empty() => faces,
        _ => return false,
    };

    let area: f64 = faces.iter().map(Face::area).sum();
    let outline_box = character
        .iter()
        .fold(BoundingBox::EMPTY, |bbox, w| bbox.union(w.bounding_box()));
    let faces_box = faces
        .iter()
        .fold(BoundingBox::EMPTY, |bbox, f| bbox.union(f.bounding_box()));

    area > PROBE_MIN_AREA
        && is_close(
            outline_box.diagonal_length(),
            faces_box.diagonal_length(),
            PROBE_DIAGONAL_TOLERANCE,
        )
}
