//! This module arranges rendered strings into a single compound.
//!
//! Every string is rendered around the origin by
//! [`RenderPass`](crate::typography::render::RenderPass), then moved to its
//! slot by the [`StringPlacer`] of the layout.

pub mod linear;
pub mod radial;

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::config::ShapeStringConfig;
use crate::fonts::GlyphRasterizer;
use crate::geometry::kernel::ShapeKernel;
use crate::geometry::shapes::{Compound, Shape};
use crate::layout::linear::LinearLayout;
use crate::layout::radial::RadialLayout;
use crate::typography::justification::Justification;
use crate::typography::render::RenderPass;
use crate::warning::{WarningType, Warnings};

/// The arrangement of the strings of an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LayoutConfig {
    /// Strings side by side along the X axis.
    Linear(LinearLayout),

    /// Strings around a circular arc.
    Radial(RadialLayout),
}

impl Default for LayoutConfig {
    fn default() -> LayoutConfig {
        LayoutConfig::Linear(LinearLayout::default())
    }
}

impl LayoutConfig {
    /// The kind of object using this layout, as reported in warnings.
    pub fn object_name(&self) -> &'static str {
        match self {
            LayoutConfig::Linear(_) => "SpacedShapeString",
            LayoutConfig::Radial(_) => "RadialShapeString",
        }
    }

    /// The justification used when none is configured.
    pub fn default_justification(&self) -> Justification {
        match self {
            LayoutConfig::Linear(_) => Justification::BOTTOM_LEFT,
            LayoutConfig::Radial(_) => Justification::MIDDLE_CENTER,
        }
    }

    /// Creates the placer of a new pass.
    pub fn placer(&self) -> Box<dyn StringPlacer> {
        match self {
            LayoutConfig::Linear(linear) => Box::new(linear.placer()),
            LayoutConfig::Radial(radial) => Box::new(radial.placer()),
        }
    }
}

/// Moves rendered strings to their slot in the layout.
pub trait StringPlacer {
    /// Places the shapes of the string at `index` in the list of strings.
    ///
    /// Only strings that rendered something are placed, in order.
    fn place(&mut self, index: usize, shapes: Vec<Shape>) -> Vec<Shape>;
}

/// Where the shapes of one string ended up in the compound.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedString {
    /// The index of the string in the configuration.
    pub index: usize,

    /// The text of the string.
    pub text: String,

    /// The indices of its sub-shapes in the compound.
    pub shapes: Range<usize>,
}

/// The result of a layout pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutOutput {
    /// The compound of every rendered string, unset when nothing rendered.
    pub shape: Option<Compound>,

    /// The strings that rendered, in order.
    pub strings: Vec<PlacedString>,

    /// The warnings emitted during the pass.
    pub warnings: Warnings,
}

/// Renders and places every string of an object.
///
/// This never fails: problems are reported as warnings, and the strings
/// that could not be rendered are left out.
pub fn execute(
    config: &ShapeStringConfig,
    rasterizer: &dyn GlyphRasterizer,
    kernel: &dyn ShapeKernel,
) -> LayoutOutput {
    let object = config.layout.object_name();
    let mut output = LayoutOutput::default();

    let font_file = match &config.font_file {
        Some(font_file) => font_file,
        None => {
            output
                .warnings
                .push(WarningType::MissingFontFile, object, None);
            return output;
        }
    };

    let pass = match RenderPass::new(config, font_file, rasterizer, kernel, object) {
        Ok(pass) => pass,
        Err(e) => {
            output
                .warnings
                .push(WarningType::StringsHaveNoWires, object, Some(e.to_string()));
            return output;
        }
    };

    info!(
        "rendering {} strings with {}, cap height {} mm, {}",
        config.strings.len(),
        font_file.display(),
        pass.cap_height(),
        if pass.fills() { "filled" } else { "outlines only" }
    );

    let mut placer = config.layout.placer();
    let mut shapes = vec![];

    for (index, text) in config.strings.iter().enumerate() {
        if text.is_empty() {
            continue;
        }

        let rendered = match pass.render_string(text, &mut output.warnings) {
            Ok(rendered) => rendered,
            Err(e) => {
                output.warnings.push(
                    WarningType::StringHasNoWires,
                    object,
                    Some(format!("{:?}: {}", text, e)),
                );
                continue;
            }
        };

        if rendered.is_empty() {
            debug!("string {} ({:?}) rendered nothing", index, text);
            continue;
        }

        let start = shapes.len();
        shapes.extend(placer.place(index, rendered));
        debug!("string {} ({:?}) placed", index, text);

        output.strings.push(PlacedString {
            index,
            text: text.clone(),
            shapes: start..shapes.len(),
        });
    }

    if shapes.is_empty() {
        output
            .warnings
            .push(WarningType::StringsHaveNoWires, object, None);
    } else {
        output.shape = Some(Compound::new(shapes));
    }

    output
}
