//! Strings side by side along the X axis.

use serde::{Deserialize, Serialize};

use crate::geometry::shapes::{Compound, Shape};
use crate::geometry::{Point, Transformable};
use crate::layout::StringPlacer;
use crate::units::Length;

fn default_offset() -> Length {
    Length(10.0)
}

/// The properties of a linear layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearLayout {
    /// The gap added after each string.
    #[serde(default = "default_offset")]
    pub offset: Length,

    /// Whether the width of each string is added to the gap.
    #[serde(default)]
    pub use_bounding_box: bool,
}

impl Default for LinearLayout {
    fn default() -> LinearLayout {
        LinearLayout {
            offset: default_offset(),
            use_bounding_box: false,
        }
    }
}

impl LinearLayout {
    /// Creates a placer starting at the origin.
    pub fn placer(&self) -> LinearPlacer {
        LinearPlacer {
            layout: self.clone(),
            x_offset: 0.0,
        }
    }
}

/// Places strings one after the other.
#[derive(Debug, Clone)]
pub struct LinearPlacer {
    layout: LinearLayout,

    /// Where the next string starts.
    x_offset: f64,
}

impl StringPlacer for LinearPlacer {
    fn place(&mut self, _: usize, shapes: Vec<Shape>) -> Vec<Shape> {
        let compound = Compound::new(shapes).translated(Point::new(self.x_offset, 0.0));

        if self.layout.use_bounding_box {
            self.x_offset += compound.bounding_box().x_length();
        }
        self.x_offset += self.layout.offset.mm();

        compound.into_shapes()
    }
}

#[cfg(test)]
mod tests {
    use crate::geometry::shapes::{Compound, Shape};
    use crate::layout::linear::LinearLayout;
    use crate::layout::StringPlacer;
    use crate::tests::rectangle;
    use crate::units::{nearly_equal, Length};

    fn string(width: f64) -> Vec<Shape> {
        vec![Shape::Wire(rectangle(0.0, 0.0, width, 1.0))]
    }

    fn x_min(shapes: &[Shape]) -> f64 {
        Compound::new(shapes.to_vec()).bounding_box().x_min
    }

    #[test]
    fn fixed_offset() {
        let mut placer = LinearLayout::default().placer();
        let starts: Vec<f64> = (0..3).map(|i| x_min(&placer.place(i, string(4.0)))).collect();
        assert_eq!(starts, vec![0.0, 10.0, 20.0]);
    }

    #[test]
    fn bounding_box_offset() {
        let layout = LinearLayout {
            offset: Length(5.0),
            use_bounding_box: true,
        };
        let mut placer = layout.placer();

        assert!(nearly_equal(x_min(&placer.place(0, string(10.0))), 0.0));
        assert!(nearly_equal(x_min(&placer.place(1, string(3.0))), 15.0));
        assert!(nearly_equal(x_min(&placer.place(2, string(1.0))), 23.0));
    }
}
