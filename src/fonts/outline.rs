//! Glyph outlines read from font files with freetype.

use std::path::{Path, PathBuf};

use freetype::face::LoadFlag;
use freetype::outline::Curve;
use freetype::{Face, Library, Vector};

use crate::fonts::{CharacterWires, GlyphRasterizer};
use crate::geometry::shapes::Wire;
use crate::geometry::Point;
use crate::{Error, Result};

/// Number of segments a conic Bézier is flattened into.
const CONIC_SEGMENTS: usize = 8;

/// Number of segments a cubic Bézier is flattened into.
const CUBIC_SEGMENTS: usize = 12;

/// A rasterizer reading TrueType and OpenType outlines with freetype.
pub struct FreetypeRasterizer {
    /// The freetype library, needed to open font files.
    library: Library,
}

impl FreetypeRasterizer {
    /// Initializes freetype.
    pub fn init() -> Result<FreetypeRasterizer> {
        Ok(FreetypeRasterizer {
            library: Library::init()?,
        })
    }

    /// Opens a font file.
    fn open(&self, font_file: &Path) -> Result<Face> {
        if !font_file.is_file() {
            return Err(Error::FontNotFound(PathBuf::from(font_file)));
        }

        Ok(self.library.new_face(font_file, 0)?)
    }
}

/// Converts a point in font units to millimetres, moved by `origin`.
fn to_point(v: &Vector, scale: f64, origin: f64) -> Point {
    Point::new(v.x as f64 * scale + origin, v.y as f64 * scale)
}

/// Appends the points of a conic Bézier, excluding its start.
fn flatten_conic(points: &mut Vec<Point>, start: Point, control: Point, end: Point) {
    for i in 1..=CONIC_SEGMENTS {
        let t = i as f64 / CONIC_SEGMENTS as f64;
        let u = 1.0 - t;
        points.push(start * (u * u) + control * (2.0 * u * t) + end * (t * t));
    }
}

/// Appends the points of a cubic Bézier, excluding its start.
fn flatten_cubic(points: &mut Vec<Point>, start: Point, c1: Point, c2: Point, end: Point) {
    for i in 1..=CUBIC_SEGMENTS {
        let t = i as f64 / CUBIC_SEGMENTS as f64;
        let u = 1.0 - t;
        points.push(
            start * (u * u * u)
                + c1 * (3.0 * u * u * t)
                + c2 * (3.0 * u * t * t)
                + end * (t * t * t),
        );
    }
}

/// Reads the loops of the glyph currently loaded in `face`.
fn glyph_wires(face: &Face, scale: f64, origin: f64) -> CharacterWires {
    let glyph = face.glyph();
    let outline = match glyph.outline() {
        Some(outline) => outline,
        None => return vec![],
    };

    let mut wires = vec![];

    for contour in outline.contours_iter() {
        let mut current = to_point(contour.start(), scale, origin);
        let mut points = vec![current];

        for curve in contour {
            current = match curve {
                Curve::Line(end) => {
                    let end = to_point(&end, scale, origin);
                    points.push(end);
                    end
                }
                Curve::Bezier2(control, end) => {
                    let control = to_point(&control, scale, origin);
                    let end = to_point(&end, scale, origin);
                    flatten_conic(&mut points, current, control, end);
                    end
                }
                Curve::Bezier3(c1, c2, end) => {
                    let c1 = to_point(&c1, scale, origin);
                    let c2 = to_point(&c2, scale, origin);
                    let end = to_point(&end, scale, origin);
                    flatten_cubic(&mut points, current, c1, c2, end);
                    end
                }
            };
        }

        wires.push(Wire::closed(points));
    }

    wires
}

impl GlyphRasterizer for FreetypeRasterizer {
    fn rasterize(
        &self,
        text: &str,
        font_file: &Path,
        size: f64,
        tracking: f64,
    ) -> Result<Vec<CharacterWires>> {
        let face = self.open(font_file)?;
        let units_per_em = f64::from(face.em_size());
        let scale = if units_per_em > 0.0 {
            size / units_per_em
        } else {
            size / 1000.0
        };

        let mut pen = 0.0;
        let mut characters = Vec::with_capacity(text.len());

        for c in text.chars() {
            if face.load_char(c as usize, LoadFlag::NO_SCALE).is_err() {
                warn!("font {} cannot render {:?}", font_file.display(), c);
                characters.push(vec![]);
                pen += tracking;
                continue;
            }

            characters.push(glyph_wires(&face, scale, pen));
            pen += face.glyph().metrics().horiAdvance as f64 * scale + tracking;
        }

        Ok(characters)
    }
}
