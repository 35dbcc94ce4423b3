//! This module holds the logic that turns one string into shapes: filling
//! glyph outlines, scaling, slanting and justifying them.

pub mod fill;
pub mod justification;
pub mod render;
