//! Preview of a compound as a PDF drawing.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use printpdf::{Line, Mm, PdfDocument, PdfLayerReference};

use crate::geometry::shapes::{Compound, Wire};
use crate::geometry::Point;
use crate::Result;

/// The blank space around the drawing, in mm.
pub const MARGIN: f64 = 10.0;

/// Outline thickness, in pt.
pub const OUTLINE_THICKNESS: f64 = 0.2;

/// Draws one wire on a layer, moved by `origin`.
fn draw_wire(layer: &PdfLayerReference, wire: &Wire, origin: Point) {
    let points = wire
        .points
        .iter()
        .map(|p| {
            let p = *p + origin;
            (printpdf::Point::new(Mm(p.x), Mm(p.y)), false)
        })
        .collect();

    layer.add_shape(Line {
        points,
        is_closed: wire.closed,
        has_fill: false,
        has_stroke: true,
        is_clipping_path: false,
    });
}

/// Writes the outlines of a compound to a single page PDF file.
///
/// The page is sized to fit the compound with a margin all around.
pub fn save_pdf<P: AsRef<Path>>(compound: &Compound, title: &str, path: P) -> Result<()> {
    let bbox = compound.bounding_box();
    let (width, height, origin) = if bbox.is_valid() {
        (
            bbox.x_length() + 2.0 * MARGIN,
            bbox.y_length() + 2.0 * MARGIN,
            Point::new(MARGIN - bbox.x_min, MARGIN - bbox.y_min),
        )
    } else {
        (2.0 * MARGIN, 2.0 * MARGIN, Point::ZERO)
    };

    let (document, page, layer) = PdfDocument::new(title, Mm(width), Mm(height), "Outlines");
    let layer = document.get_page(page).get_layer(layer);
    layer.set_outline_thickness(OUTLINE_THICKNESS);

    let mut count = 0;
    for shape in compound.iter() {
        for wire in shape.wires() {
            draw_wire(&layer, wire, origin);
            count += 1;
        }
    }

    debug!("{} wires drawn on a {} x {} mm page", count, width, height);

    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    document.save(&mut writer)?;
    Ok(())
}
