//! This module defines the configuration of a shape string project. The
//! configuration is parsed from a TOML file located at the root of the
//! project. Every property takes a default value that is also provided by
//! this module.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::document::pdf::save_pdf;
use crate::document::{Placement, ShapeStringObject};
use crate::fonts::outline::FreetypeRasterizer;
use crate::geometry::kernel::PlanarKernel;
use crate::layout::linear::LinearLayout;
use crate::layout::LayoutConfig;
use crate::typography::justification::{Justification, JustificationReference};
use crate::units::{Angle, Length};
use crate::warning::Warnings;
use crate::Result;

/// The name of the project file.
pub const CONFIG_FILE: &str = "shapestrings.toml";

fn default_size() -> Length {
    Length(100.0)
}

fn default_true() -> bool {
    true
}

/// The properties of a shape string object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStringConfig {
    /// The strings to render, in order.
    #[serde(default)]
    pub strings: Vec<String>,

    /// The font used to render the strings.
    #[serde(default)]
    pub font_file: Option<PathBuf>,

    /// The height of the text, i.e. its cap height when `scale_to_size` is set.
    #[serde(default = "default_size")]
    pub size: Length,

    /// Extra space after each character.
    #[serde(default)]
    pub tracking: Length,

    /// The alignment of each string. When unset, the default of the layout is used.
    #[serde(default)]
    pub justification: Option<Justification>,

    /// The height used for vertical alignment.
    #[serde(default)]
    pub justification_reference: JustificationReference,

    /// Whether left aligned strings keep their leading bearing.
    #[serde(default)]
    pub keep_left_margin: bool,

    /// Whether strings are scaled so that their cap height equals `size`.
    #[serde(default = "default_true")]
    pub scale_to_size: bool,

    /// The slant of the text, between -80 and +80 degrees.
    #[serde(default)]
    pub oblique_angle: Angle,

    /// Whether glyph outlines are filled with faces.
    #[serde(default = "default_true")]
    pub make_face: bool,

    /// Whether overlapping faces are fused. Usually not required, and slow.
    #[serde(default)]
    pub fuse: bool,

    /// How the strings are arranged.
    #[serde(default)]
    pub layout: LayoutConfig,
}

impl Default for ShapeStringConfig {
    fn default() -> ShapeStringConfig {
        ShapeStringConfig::new(LayoutConfig::default())
    }
}

impl ShapeStringConfig {
    /// Creates a configuration with default properties for the given layout.
    pub fn new(layout: LayoutConfig) -> ShapeStringConfig {
        ShapeStringConfig {
            strings: vec![],
            font_file: None,
            size: default_size(),
            tracking: Length(0.0),
            justification: None,
            justification_reference: JustificationReference::CapHeight,
            keep_left_margin: false,
            scale_to_size: true,
            oblique_angle: Angle(0.0),
            make_face: true,
            fuse: false,
            layout,
        }
    }

    /// The alignment of the strings.
    pub fn justification(&self) -> Justification {
        self.justification
            .unwrap_or_else(|| self.layout.default_justification())
    }
}

/// Holds the configuration of a project: one shape string object and the
/// file its preview is written to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// The title of the project.
    pub title: String,

    /// The path of the PDF preview, relative to the project directory.
    pub output: PathBuf,

    /// Where the object is placed.
    #[serde(default)]
    pub placement: Placement,

    /// The shape string object.
    pub shapestring: ShapeStringConfig,
}

impl Config {
    /// Creates a default configuration with a title.
    pub fn with_title(title: &str) -> Config {
        let mut shapestring = ShapeStringConfig::new(LayoutConfig::Linear(LinearLayout::default()));
        shapestring.strings = vec![String::from(title)];
        shapestring.size = Length(10.0);

        Config {
            title: String::from(title),
            output: PathBuf::from("output.pdf"),
            placement: Placement::default(),
            shapestring,
        }
    }

    /// Reads a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
        let content = fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&content)?)
    }

    /// Writes the configuration to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml = toml::to_string(self)?;
        let mut file = BufWriter::new(File::create(path.as_ref())?);
        file.write_all(toml.as_bytes())?;
        Ok(())
    }

    /// Renders the project located in `root` and writes its preview.
    ///
    /// Relative font paths are resolved from `root`.
    pub fn build<P: AsRef<Path>>(&self, root: P) -> Result<Warnings> {
        let root = root.as_ref();
        let mut shapestring = self.shapestring.clone();
        shapestring.font_file = shapestring.font_file.map(|font| root.join(font));

        let rasterizer = FreetypeRasterizer::init()?;
        let kernel = PlanarKernel;

        let mut object = ShapeStringObject::new(shapestring);
        object.set_placement(self.placement);
        let warnings = object.execute(&rasterizer, &kernel);

        match object.placed_shape() {
            Some(shape) => {
                let output = root.join(&self.output);
                save_pdf(&shape, &self.title, &output)?;
                info!("wrote {}", output.display());
            }
            None => warn!("nothing to write"),
        }

        Ok(warnings)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{Config, ShapeStringConfig};
    use crate::layout::radial::{RadialLayout, RotationDirection};
    use crate::layout::LayoutConfig;
    use crate::typography::justification::{Justification, JustificationReference};
    use crate::units::nearly_equal;

    #[test]
    fn defaults_of_a_linear_object() {
        let config: ShapeStringConfig = toml::from_str("strings = [\"A\", \"B\"]").unwrap();

        assert_eq!(config.strings, vec!["A", "B"]);
        assert!(config.font_file.is_none());
        assert!(config.scale_to_size);
        assert!(config.make_face);
        assert!(!config.fuse);
        assert!(!config.keep_left_margin);
        assert_eq!(config.justification(), Justification::BOTTOM_LEFT);
        assert_eq!(
            config.justification_reference,
            JustificationReference::CapHeight
        );

        match config.layout {
            LayoutConfig::Linear(linear) => {
                assert!(nearly_equal(linear.offset.mm(), 10.0));
                assert!(!linear.use_bounding_box);
            }
            other => panic!("unexpected layout {:?}", other),
        }
    }

    #[test]
    fn defaults_of_a_radial_object() {
        let config: ShapeStringConfig = toml::from_str(
            r#"
            strings = ["12", "3", "6", "9"]
            font_file = "fonts/sans.ttf"

            [layout]
            kind = "radial"
            angle_step = "-90 deg"
            "#,
        )
        .unwrap();

        assert_eq!(config.justification(), Justification::MIDDLE_CENTER);

        let expected = RadialLayout {
            angle_step: "-90 deg".parse().unwrap(),
            ..RadialLayout::default()
        };
        assert_eq!(config.layout, LayoutConfig::Radial(expected));

        match config.layout {
            LayoutConfig::Radial(radial) => {
                assert!(nearly_equal(radial.radius.mm(), 50.0));
                assert!(radial.tangential);
                assert_eq!(radial.rotation_direction, RotationDirection::CounterClockwise);
            }
            other => panic!("unexpected layout {:?}", other),
        }
    }

    #[test]
    fn host_property_names_are_understood() {
        let config: ShapeStringConfig = toml::from_str(
            r#"
            size = "2 cm"
            justification = "Top-Right"
            justification_reference = "Shape Height"
            oblique_angle = 12
            "#,
        )
        .unwrap();

        assert!(nearly_equal(config.size.mm(), 20.0));
        assert_eq!(config.justification().to_string(), "Top-Right");
        assert_eq!(
            config.justification_reference,
            JustificationReference::ShapeHeight
        );
        assert!(nearly_equal(config.oblique_angle.degrees(), 12.0));
    }

    #[test]
    fn project_round_trip() {
        let config = Config::with_title("Hello");
        let toml = toml::to_string(&config).unwrap();
        let read: Config = toml::from_str(&toml).unwrap();
        assert_eq!(read, config);
    }
}
