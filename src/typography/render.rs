//! Rendering of a single string into positioned, unplaced shapes.

use std::path::Path;

use crate::config::ShapeStringConfig;
use crate::fonts::GlyphRasterizer;
use crate::geometry::bbox::BoundingBox;
use crate::geometry::kernel::ShapeKernel;
use crate::geometry::shapes::{Compound, Face, Shape};
use crate::geometry::{Transform, Transformable};
use crate::typography::fill::{character_faces, font_fills_cleanly, CharacterFaces};
use crate::typography::justification::justification_offset;
use crate::warning::{WarningType, Warnings};
use crate::Result;

/// The glyph whose height is the cap height of a font.
pub const CAP_HEIGHT_GLYPH: &str = "M";

/// The largest slant, in degrees, either way.
pub const MAX_OBLIQUE_ANGLE: f64 = 80.0;

/// What every string of a pass shares: the collaborators, the cap height
/// and the fill decision.
pub struct RenderPass<'a> {
    config: &'a ShapeStringConfig,
    font_file: &'a Path,
    rasterizer: &'a dyn GlyphRasterizer,
    kernel: &'a dyn ShapeKernel,
    object: &'static str,

    /// The cap height used for justification.
    cap_height: f64,

    /// The factor applied to every string, if any.
    scale: Option<f64>,

    /// Whether characters are filled with faces.
    fill: bool,
}

impl<'a> RenderPass<'a> {
    /// Measures the cap height of the font and decides whether its glyphs
    /// can be filled.
    pub fn new(
        config: &'a ShapeStringConfig,
        font_file: &'a Path,
        rasterizer: &'a dyn GlyphRasterizer,
        kernel: &'a dyn ShapeKernel,
        object: &'static str,
    ) -> Result<RenderPass<'a>> {
        let size = config.size.mm();
        let tracking = config.tracking.mm();
        let sample = rasterizer.rasterize(CAP_HEIGHT_GLYPH, font_file, size, tracking)?;
        let sample_box = sample
            .iter()
            .flatten()
            .fold(BoundingBox::EMPTY, |bbox, w| bbox.union(w.bounding_box()));

        let measured = if sample_box.is_valid() && sample_box.y_max > 0.0 {
            sample_box.y_max
        } else {
            warn!(
                "{} has no usable {:?}, using the size as cap height",
                font_file.display(),
                CAP_HEIGHT_GLYPH
            );
            size
        };

        let (cap_height, scale) = if config.scale_to_size {
            (size, Some(size / measured))
        } else {
            (measured, None)
        };

        let fill = config.make_face && font_fills_cleanly(rasterizer, kernel, font_file);
        if config.make_face && !fill {
            info!("{} is not fillable, rendering outlines", font_file.display());
        }

        debug!("cap height {} mm, scale {:?}", cap_height, scale);

        Ok(RenderPass {
            config,
            font_file,
            rasterizer,
            kernel,
            object,
            cap_height,
            scale,
            fill,
        })
    }

    /// The cap height strings are justified against.
    pub fn cap_height(&self) -> f64 {
        self.cap_height
    }

    /// Whether characters are filled with faces.
    pub fn fills(&self) -> bool {
        self.fill
    }

    /// Renders one string, justified around the origin.
    ///
    /// An empty vector means nothing could be rendered from `text`.
    pub fn render_string(&self, text: &str, warnings: &mut Warnings) -> Result<Vec<Shape>> {
        let config = self.config;
        let characters = self.rasterizer.rasterize(
            text,
            self.font_file,
            config.size.mm(),
            config.tracking.mm(),
        )?;

        let mut shapes = vec![];
        let mut faces: Vec<Face> = vec![];

        for (c, character) in text.chars().zip(characters.iter()) {
            if character.is_empty() {
                continue;
            }

            if !self.fill {
                shapes.extend(character.iter().cloned().map(Shape::Wire));
                continue;
            }

            match character_faces(self.kernel, character) {
                CharacterFaces::Faces(f) => faces.extend(f),
                CharacterFaces::NoClosedWires => warnings.push(
                    WarningType::FaceCreationFailed,
                    self.object,
                    Some(format!("character {:?} of {:?} has no closed wire", c, text)),
                ),
                CharacterFaces::Failed(e) => warnings.push(
                    WarningType::FaceCreationFailed,
                    self.object,
                    Some(format!("character {:?} of {:?}: {}", c, text, e)),
                ),
            }
        }

        if self.fill && config.fuse && !faces.is_empty() {
            faces = match self.kernel.fuse(&faces) {
                Ok(fused) => fused,
                Err(e) => {
                    warn!("cannot fuse {:?}, keeping its faces apart: {}", text, e);
                    faces
                }
            };
        }

        shapes.extend(faces.into_iter().map(Shape::Face));

        if shapes.is_empty() {
            return Ok(shapes);
        }

        let mut compound = Compound::new(shapes);

        if let Some(factor) = self.scale {
            compound = compound.transformed(&Transform::scaling(factor));
        }

        let oblique = config.oblique_angle.degrees();
        if oblique != 0.0 {
            if (-MAX_OBLIQUE_ANGLE..=MAX_OBLIQUE_ANGLE).contains(&oblique) {
                let shear = Transform::shear_x(config.oblique_angle.radians().tan());
                compound = compound.transformed(&shear);
            } else {
                warnings.push(
                    WarningType::ObliqueAngleOutOfRange,
                    self.object,
                    Some(format!("{} degrees", oblique)),
                );
            }
        }

        let offset = justification_offset(
            &compound.bounding_box(),
            self.cap_height,
            config.justification(),
            config.justification_reference,
            config.keep_left_margin,
        );

        Ok(compound.translated(offset).into_shapes())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use crate::config::ShapeStringConfig;
    use crate::geometry::kernel::PlanarKernel;
    use crate::geometry::shapes::{Compound, Shape};
    use crate::tests::TestRasterizer;
    use crate::typography::justification::Justification;
    use crate::typography::render::RenderPass;
    use crate::units::{nearly_equal, Angle, Length};
    use crate::warning::{WarningType, Warnings};

    const OBJECT: &str = "SpacedShapeString";

    fn config(size: f64) -> ShapeStringConfig {
        let mut config = ShapeStringConfig::default();
        config.size = Length(size);
        config
    }

    fn render(
        config: &ShapeStringConfig,
        rasterizer: &TestRasterizer,
        text: &str,
    ) -> (Vec<Shape>, Warnings) {
        let font = Path::new("test.ttf");
        let pass = RenderPass::new(config, font, rasterizer, &PlanarKernel, OBJECT).unwrap();
        let mut warnings = Warnings::new();
        let shapes = pass.render_string(text, &mut warnings).unwrap();
        (shapes, warnings)
    }

    #[test]
    fn filled_string_sits_on_the_baseline() {
        let (shapes, warnings) = render(&config(10.0), &TestRasterizer::new(), "AB");
        assert!(warnings.is_empty());
        assert_eq!(shapes.len(), 2);
        assert!(shapes.iter().all(|s| matches!(s, Shape::Face(_))));

        let bbox = Compound::new(shapes).bounding_box();
        assert!(nearly_equal(bbox.x_min, 0.0));
        assert!(nearly_equal(bbox.x_max, 10.0));
        assert!(nearly_equal(bbox.y_min, 0.0));
        assert!(nearly_equal(bbox.y_max, 10.0));
    }

    #[test]
    fn scale_to_size_uses_the_cap_height() {
        // Glyphs twice as high as the size are scaled down by half.
        let rasterizer = TestRasterizer::new().with_glyph_ratio(0.5, 2.0);
        let (shapes, _) = render(&config(10.0), &rasterizer, "A");
        let bbox = Compound::new(shapes).bounding_box();
        assert!(nearly_equal(bbox.y_length(), 10.0));
        assert!(nearly_equal(bbox.x_length(), 2.5));

        let mut unscaled = config(10.0);
        unscaled.scale_to_size = false;
        let (shapes, _) = render(&unscaled, &rasterizer, "A");
        let bbox = Compound::new(shapes).bounding_box();
        assert!(nearly_equal(bbox.y_length(), 20.0));
    }

    #[test]
    fn pass_metrics() {
        let font = Path::new("test.ttf");
        let rasterizer = TestRasterizer::new().with_glyph_ratio(0.5, 2.0);

        let config = config(10.0);
        let pass = RenderPass::new(&config, font, &rasterizer, &PlanarKernel, OBJECT).unwrap();
        assert!(nearly_equal(pass.cap_height(), 10.0));
        assert!(pass.fills());

        let mut unscaled = config.clone();
        unscaled.scale_to_size = false;
        unscaled.make_face = false;
        let pass = RenderPass::new(&unscaled, font, &rasterizer, &PlanarKernel, OBJECT).unwrap();
        assert!(nearly_equal(pass.cap_height(), 20.0));
        assert!(!pass.fills());

        let sticky = TestRasterizer::sticky();
        let pass = RenderPass::new(&config, font, &sticky, &PlanarKernel, OBJECT).unwrap();
        assert!(!pass.fills());
    }

    #[test]
    fn middle_center_uses_the_cap_height() {
        let mut config = config(10.0);
        config.justification = Some(Justification::MIDDLE_CENTER);
        let (shapes, _) = render(&config, &TestRasterizer::new(), "AB");
        let center = Compound::new(shapes).bounding_box().center();
        assert!(nearly_equal(center.x, 0.0));
        assert!(nearly_equal(center.y, 0.0));
    }

    #[test]
    fn unfilled_strings_keep_their_wires() {
        let mut config = config(10.0);
        config.make_face = false;
        let (shapes, _) = render(&config, &TestRasterizer::new(), "AO");
        // The counter of the O is a wire of its own.
        assert_eq!(shapes.len(), 3);
        assert!(shapes.iter().all(|s| matches!(s, Shape::Wire(_))));
    }

    #[test]
    fn sticky_fonts_are_not_filled() {
        let (shapes, warnings) = render(&config(10.0), &TestRasterizer::sticky(), "AB");
        assert!(warnings.is_empty());
        assert!(shapes.iter().all(|s| matches!(s, Shape::Wire(_))));
    }

    #[test]
    fn blank_strings_render_nothing() {
        let (shapes, warnings) = render(&config(10.0), &TestRasterizer::new(), "   ");
        assert!(shapes.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn counters_become_holes() {
        let (shapes, _) = render(&config(10.0), &TestRasterizer::new(), "O");
        assert_eq!(shapes.len(), 1);
        match &shapes[0] {
            Shape::Face(face) => {
                assert_eq!(face.boundaries.len(), 2);
                assert!(face.area() < 50.0);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn oblique_shears_the_top() {
        let mut config = config(10.0);
        config.oblique_angle = Angle(45.0);
        let (shapes, warnings) = render(&config, &TestRasterizer::new(), "A");
        assert!(warnings.is_empty());
        let bbox = Compound::new(shapes).bounding_box();
        assert!(nearly_equal(bbox.x_length(), 15.0));
        assert!(nearly_equal(bbox.x_min, 0.0));
    }

    #[test]
    fn oblique_out_of_range_is_ignored() {
        let mut slanted = config(10.0);
        slanted.oblique_angle = Angle(85.0);
        let (shapes, warnings) = render(&slanted, &TestRasterizer::new(), "AB");
        assert_eq!(warnings.count(WarningType::ObliqueAngleOutOfRange), 1);

        let (upright, _) = render(&config(10.0), &TestRasterizer::new(), "AB");
        assert_eq!(shapes, upright);
    }

    #[test]
    fn fused_overlapping_glyphs() {
        let mut config = config(10.0);
        config.fuse = true;
        config.tracking = Length(-2.0);
        let (shapes, _) = render(&config, &TestRasterizer::new(), "AB");
        assert_eq!(shapes.len(), 1);
    }
}
