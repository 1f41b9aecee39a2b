//! Detection candidates and their pruning.
//!
//! Includes the box type, deterministic confidence ordering, and greedy
//! non-maximum suppression.

mod bbox;
pub(crate) mod nms;
pub(crate) mod order;

pub use bbox::BoundingBox;

use crate::geometry::GridGeometry;

/// One labeled, scored box in model-input pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Detection {
    /// Box center and size in pixels.
    pub bbox: BoundingBox,
    /// Objectness times the best class probability.
    pub confidence: f32,
    /// Index into the geometry's class labels.
    pub class_index: usize,
}

impl Detection {
    /// Returns the class label from `geometry`, or `None` for a foreign index.
    pub fn label<'g>(&self, geometry: &'g GridGeometry) -> Option<&'g str> {
        geometry.label(self.class_index)
    }
}
