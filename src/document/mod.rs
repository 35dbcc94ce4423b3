//! This module holds the parametric shape string object: its properties,
//! its placement and the geometry it last generated.

pub mod pdf;
pub mod properties;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::config::ShapeStringConfig;
use crate::document::properties::Property;
use crate::fonts::GlyphRasterizer;
use crate::geometry::kernel::ShapeKernel;
use crate::geometry::shapes::Compound;
use crate::geometry::{Point, Transform, Transformable};
use crate::layout::{self, PlacedString};
use crate::units::{Angle, Length};
use crate::warning::Warnings;

/// Where an object stands in the host: a base point and a rotation about Z.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// The X coordinate of the base point.
    #[serde(default)]
    pub x: Length,

    /// The Y coordinate of the base point.
    #[serde(default)]
    pub y: Length,

    /// The rotation about Z.
    #[serde(default)]
    pub rotation: Angle,
}

impl Placement {
    /// The transform from the local frame of the object to the host.
    pub fn to_transform(&self) -> Transform {
        Transform::rotation(self.rotation.degrees())
            .then(&Transform::translation(Point::new(self.x.mm(), self.y.mm())))
    }
}

/// The state of an object in its recompute cycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ObjectState {
    /// No shape yet, or the last pass generated nothing.
    Unplaced,

    /// A pass is running.
    Rendering,

    /// A shape was generated and is placed by the host.
    Placed,
}

/// A parametric object generating a compound from strings.
#[derive(Debug, Clone)]
pub struct ShapeStringObject {
    config: ShapeStringConfig,
    placement: Placement,
    shape: Option<Compound>,
    strings: Vec<PlacedString>,
    state: ObjectState,

    /// The properties changed since the last pass.
    changed: HashSet<Property>,

    /// Number of passes that rebuilt the geometry.
    generations: usize,
}

impl ShapeStringObject {
    /// Creates an object that has not generated anything yet.
    pub fn new(config: ShapeStringConfig) -> ShapeStringObject {
        ShapeStringObject {
            config,
            placement: Placement::default(),
            shape: None,
            strings: vec![],
            state: ObjectState::Unplaced,
            changed: HashSet::new(),
            generations: 0,
        }
    }

    /// The properties of the object.
    pub fn config(&self) -> &ShapeStringConfig {
        &self.config
    }

    /// The placement of the object.
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// The state of the object.
    pub fn state(&self) -> ObjectState {
        self.state
    }

    /// The number of passes that rebuilt the geometry.
    pub fn generations(&self) -> usize {
        self.generations
    }

    /// The strings that rendered during the last pass.
    pub fn strings(&self) -> &[PlacedString] {
        &self.strings
    }

    /// Changes a property.
    pub fn modify<F: FnOnce(&mut ShapeStringConfig)>(&mut self, property: Property, f: F) {
        f(&mut self.config);
        self.changed.insert(property);
    }

    /// Moves the object.
    pub fn set_placement(&mut self, placement: Placement) {
        self.placement = placement;
        self.changed.insert(Property::Placement);
    }

    /// Whether the changes since the last pass require the geometry to be
    /// rebuilt.
    pub fn needs_regeneration(&self) -> bool {
        self.state != ObjectState::Placed
            || self.changed.iter().any(|p| p.requires_regeneration())
    }

    /// Recomputes the object.
    ///
    /// Placement changes alone keep the current geometry. Otherwise the
    /// geometry is rebuilt from scratch, and left unset if nothing rendered.
    pub fn execute(
        &mut self,
        rasterizer: &dyn GlyphRasterizer,
        kernel: &dyn ShapeKernel,
    ) -> Warnings {
        if !self.needs_regeneration() {
            debug!("placement changed, keeping the geometry");
            self.changed.clear();
            return Warnings::new();
        }

        self.state = ObjectState::Rendering;
        self.shape = None;
        self.strings.clear();

        let output = layout::execute(&self.config, rasterizer, kernel);

        self.generations += 1;
        self.changed.clear();
        self.strings = output.strings;
        self.shape = output.shape;
        self.state = if self.shape.is_some() {
            ObjectState::Placed
        } else {
            ObjectState::Unplaced
        };

        output.warnings
    }

    /// The geometry in the local frame of the object.
    pub fn shape(&self) -> Option<&Compound> {
        self.shape.as_ref()
    }

    /// The geometry moved by the placement.
    pub fn placed_shape(&self) -> Option<Compound> {
        let transform = self.placement.to_transform();
        self.shape.as_ref().map(|shape| shape.transformed(&transform))
    }
}
