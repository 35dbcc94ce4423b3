//! Test doubles and layout scenarios for ShapeStrings.

use std::io;
use std::path::{Path, PathBuf};

use crate::config::{Config, ShapeStringConfig};
use crate::fonts::{CharacterWires, GlyphRasterizer};
use crate::geometry::bbox::BoundingBox;
use crate::geometry::kernel::PlanarKernel;
use crate::geometry::shapes::{Compound, Shape, Wire};
use crate::geometry::Point;
use crate::layout::linear::LinearLayout;
use crate::layout::radial::RadialLayout;
use crate::layout::{execute, LayoutConfig, LayoutOutput};
use crate::units::{nearly_equal, Angle, Length};
use crate::warning::WarningType;
use crate::{Error, Result};

/// A counter clockwise rectangle.
pub fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Wire {
    Wire::closed(vec![
        Point::new(x, y),
        Point::new(x + width, y),
        Point::new(x + width, y + height),
        Point::new(x, y + height),
    ])
}

/// A rasterizer drawing every glyph as a rectangle sitting on the baseline.
///
/// Spaces have no outline, `O` has a counter and `-` is an open stroke.
pub struct TestRasterizer {
    /// Glyph width, relative to the size.
    width: f64,

    /// Glyph height, relative to the size.
    height: f64,

    /// Whether outlines are left open.
    sticky: bool,

    /// A text that cannot be rendered.
    failing: Option<String>,
}

impl TestRasterizer {
    /// Glyphs half as wide as they are high, high as the size.
    pub fn new() -> TestRasterizer {
        TestRasterizer {
            width: 0.5,
            height: 1.0,
            sticky: false,
            failing: None,
        }
    }

    /// A rasterizer whose outlines never close.
    pub fn sticky() -> TestRasterizer {
        TestRasterizer {
            sticky: true,
            ..TestRasterizer::new()
        }
    }

    /// Changes the size of the glyphs, relatively to the font size.
    pub fn with_glyph_ratio(self, width: f64, height: f64) -> TestRasterizer {
        TestRasterizer {
            width,
            height,
            ..self
        }
    }

    /// Makes the rendering of `text` fail.
    pub fn failing_on(self, text: &str) -> TestRasterizer {
        TestRasterizer {
            failing: Some(text.into()),
            ..self
        }
    }

    fn glyph(&self, c: char, x: f64, width: f64, height: f64) -> CharacterWires {
        let outline = rectangle(x, 0.0, width, height);

        match c {
            ' ' => vec![],
            '-' => vec![Wire::open(vec![
                Point::new(x, height / 2.0),
                Point::new(x + width, height / 2.0),
            ])],
            _ if self.sticky => vec![Wire::open(outline.points)],
            'O' => vec![
                outline,
                rectangle(x + width / 4.0, height / 4.0, width / 2.0, height / 2.0),
            ],
            _ => vec![outline],
        }
    }
}

impl GlyphRasterizer for TestRasterizer {
    fn rasterize(
        &self,
        text: &str,
        _: &Path,
        size: f64,
        tracking: f64,
    ) -> Result<Vec<CharacterWires>> {
        if self.failing.as_deref() == Some(text) {
            return Err(Error::IoError(io::Error::new(
                io::ErrorKind::Other,
                "unreadable glyphs",
            )));
        }

        let (width, height) = (self.width * size, self.height * size);
        let mut pen = 0.0;
        let mut characters = vec![];

        for c in text.chars() {
            characters.push(self.glyph(c, pen, width, height));
            pen += width + tracking;
        }

        Ok(characters)
    }
}

fn linear(strings: &[&str], offset: f64, use_bounding_box: bool) -> ShapeStringConfig {
    let mut config = ShapeStringConfig::new(LayoutConfig::Linear(LinearLayout {
        offset: Length(offset),
        use_bounding_box,
    }));
    config.strings = strings.iter().map(|s| String::from(*s)).collect();
    config.font_file = Some(PathBuf::from("test.ttf"));
    config.size = Length(10.0);
    config
}

fn radial(strings: &[&str], angle_step: f64) -> ShapeStringConfig {
    let mut config = linear(strings, 0.0, false);
    config.layout = LayoutConfig::Radial(RadialLayout {
        angle_step: Angle(angle_step),
        ..RadialLayout::default()
    });
    config
}

fn run(config: &ShapeStringConfig) -> LayoutOutput {
    execute(config, &TestRasterizer::new(), &PlanarKernel)
}

/// The bounding box of each rendered string.
fn string_boxes(output: &LayoutOutput) -> Vec<BoundingBox> {
    let shapes: &[Shape] = match &output.shape {
        Some(compound) => &compound.shapes,
        None => &[],
    };

    output
        .strings
        .iter()
        .map(|s| Compound::new(shapes[s.shapes.clone()].to_vec()).bounding_box())
        .collect()
}

fn indices(output: &LayoutOutput) -> Vec<usize> {
    output.strings.iter().map(|s| s.index).collect()
}

#[test]
fn passes_are_deterministic() {
    let config = radial(&["AB", "O", "C"], 30.0);
    let first = run(&config);
    let second = run(&config);
    assert!(first.shape.is_some());
    assert_eq!(first, second);
}

#[test]
fn strings_keep_their_order() {
    let output = run(&linear(&["A", "BB", "C"], 10.0, true));
    assert_eq!(indices(&output), vec![0, 1, 2]);

    let ranges: Vec<_> = output.strings.iter().map(|s| s.shapes.clone()).collect();
    assert_eq!(ranges, vec![0..1, 1..3, 3..4]);
    assert_eq!(output.shape.map(|s| s.len()), Some(4));
}

#[test]
fn fixed_offsets() {
    let output = run(&linear(&["A", "B", "C"], 10.0, false));
    let starts: Vec<f64> = string_boxes(&output).iter().map(|b| b.x_min).collect();
    assert_eq!(starts, vec![0.0, 10.0, 20.0]);
}

#[test]
fn empty_strings_are_skipped() {
    let output = run(&linear(&["A", "", "B"], 10.0, false));
    assert!(output.warnings.is_empty());
    assert_eq!(indices(&output), vec![0, 2]);

    let boxes = string_boxes(&output);
    assert!(nearly_equal(boxes[1].x_min, 10.0));
}

#[test]
fn bounding_box_offsets() {
    let output = run(&linear(&["AB", "CD"], 5.0, true));
    let boxes = string_boxes(&output);
    assert!(nearly_equal(boxes[0].x_length(), 10.0));
    assert!(nearly_equal(boxes[1].x_min, 15.0));
    assert!(nearly_equal(boxes[1].y_min, 0.0));
}

#[test]
fn oblique_out_of_range_is_upright() {
    let upright = run(&linear(&["AB", "C"], 10.0, false));

    let mut config = linear(&["AB", "C"], 10.0, false);
    config.oblique_angle = Angle(85.0);
    let slanted = run(&config);

    assert_eq!(slanted.shape, upright.shape);
    assert_eq!(
        slanted.warnings.count(WarningType::ObliqueAngleOutOfRange),
        2
    );
}

#[test]
fn radial_angles() {
    let output = run(&radial(&["A", "B", "C"], 30.0));
    let center = string_boxes(&output)[2].center();
    let angle = 60f64.to_radians();
    assert!(center.is_near(Point::new(50.0 * angle.cos(), 50.0 * angle.sin()), 1e-9));
}

#[test]
fn radial_quarter_turns() {
    let output = run(&radial(&["X", "Y", "Z"], 90.0));
    let boxes = string_boxes(&output);

    assert!(boxes[1].center().is_near(Point::new(0.0, 50.0), 1e-9));
    // The baseline of Y is horizontal.
    assert!(nearly_equal(boxes[1].x_length(), 5.0));
    assert!(nearly_equal(boxes[1].y_length(), 10.0));
    // X lies on its side.
    assert!(nearly_equal(boxes[0].x_length(), 10.0));
}

#[test]
fn radial_skips_keep_their_slot() {
    let output = run(&radial(&["X", "", "Z"], 90.0));
    assert_eq!(indices(&output), vec![0, 2]);
    assert!(string_boxes(&output)[1]
        .center()
        .is_near(Point::new(-50.0, 0.0), 1e-9));
}

#[test]
fn failing_strings_do_not_stop_the_pass() {
    let rasterizer = TestRasterizer::new().failing_on("B");
    let output = execute(&linear(&["A", "B", "C"], 10.0, false), &rasterizer, &PlanarKernel);

    assert_eq!(output.warnings.count(WarningType::StringHasNoWires), 1);
    assert_eq!(indices(&output), vec![0, 2]);
    assert!(nearly_equal(string_boxes(&output)[1].x_min, 10.0));
}

#[test]
fn open_characters_are_left_out() {
    let output = run(&linear(&["A-B"], 10.0, false));
    assert_eq!(output.warnings.count(WarningType::FaceCreationFailed), 1);
    assert_eq!(output.shape.map(|s| s.len()), Some(2));
}

#[test]
fn missing_font_generates_nothing() {
    let mut config = linear(&["A"], 10.0, false);
    config.font_file = None;
    let output = run(&config);

    assert!(output.shape.is_none());
    assert!(output.warnings.contains(WarningType::MissingFontFile));
}

#[test]
fn unreadable_font_generates_nothing() {
    let rasterizer = TestRasterizer::new().failing_on("M");
    let output = execute(&linear(&["A"], 10.0, false), &rasterizer, &PlanarKernel);

    assert!(output.shape.is_none());
    assert_eq!(output.warnings.count(WarningType::StringsHaveNoWires), 1);
}

#[test]
fn nothing_to_render() {
    let output = run(&linear(&["", " "], 10.0, false));
    assert!(output.shape.is_none());
    assert!(output.strings.is_empty());
    assert_eq!(output.warnings.count(WarningType::StringsHaveNoWires), 1);
}

#[test]
fn project_file() {
    let config: Config = toml::from_str(
        r#"
        title = "Dial"
        output = "dial.pdf"

        [placement]
        x = "1 cm"
        rotation = 45

        [shapestring]
        strings = ["12", "3", "6", "9"]
        font_file = "fonts/sans.ttf"
        size = "5 mm"
        fuse = true

        [shapestring.layout]
        kind = "radial"
        start_angle = 90
        angle_step = 90
        rotation_direction = "Clockwise"
        "#,
    )
    .unwrap();

    assert_eq!(config.output, PathBuf::from("dial.pdf"));
    assert!(nearly_equal(config.placement.x.mm(), 10.0));
    assert!(nearly_equal(config.placement.rotation.degrees(), 45.0));
    assert_eq!(config.shapestring.strings.len(), 4);
    assert!(config.shapestring.fuse);

    match &config.shapestring.layout {
        LayoutConfig::Radial(radial) => assert!(nearly_equal(radial.angle(1), 0.0)),
        other => panic!("unexpected layout {:?}", other),
    }
}
