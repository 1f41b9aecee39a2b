//! Fixed grid geometry describing a network's output layout.
//!
//! A `GridGeometry` is built once, validated, and then shared by reference
//! with every decode and suppression call. Nothing in it changes after
//! construction, so it is safe to share across threads.

mod presets;

pub use presets::VOC_LABELS;

use crate::util::{YoloGridError, YoloGridResult};

/// Channels preceding the class logits for every anchor:
/// x offset, y offset, width, height and objectness.
pub const BOX_CHANNELS: usize = 5;

/// Width/height prior for one anchor, in grid-cell units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
    /// Prior width in cells.
    pub width: f32,
    /// Prior height in cells.
    pub height: f32,
}

impl Anchor {
    /// Creates an anchor prior.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Immutable output geometry of a fixed-grid detector.
#[derive(Clone, Debug, PartialEq)]
pub struct GridGeometry {
    grid_size: usize,
    input_size: usize,
    anchors: Vec<Anchor>,
    labels: Vec<String>,
    cell_size: f32,
    tensor_len: usize,
}

impl GridGeometry {
    /// Creates a validated geometry.
    ///
    /// `input_size` is the side of the square model input in pixels; each grid
    /// cell covers `input_size / grid_size` pixels.
    pub fn new<L, S>(
        grid_size: usize,
        input_size: usize,
        anchors: Vec<Anchor>,
        labels: L,
    ) -> YoloGridResult<Self>
    where
        L: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if grid_size == 0 {
            return Err(YoloGridError::InvalidGeometry("grid size must be positive"));
        }
        if input_size == 0 {
            return Err(YoloGridError::InvalidGeometry("input size must be positive"));
        }
        if anchors.is_empty() {
            return Err(YoloGridError::InvalidGeometry("at least one anchor is required"));
        }
        let valid_prior = |v: f32| v.is_finite() && v > 0.0;
        if anchors
            .iter()
            .any(|a| !valid_prior(a.width) || !valid_prior(a.height))
        {
            return Err(YoloGridError::InvalidGeometry(
                "anchor priors must be finite and positive",
            ));
        }
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(YoloGridError::InvalidGeometry("at least one class label is required"));
        }
        let tensor_len = grid_size
            .checked_mul(grid_size)
            .and_then(|cells| cells.checked_mul(anchors.len()))
            .and_then(|preds| preds.checked_mul(BOX_CHANNELS + labels.len()))
            .ok_or(YoloGridError::InvalidGeometry("tensor length overflows usize"))?;

        Ok(Self {
            grid_size,
            input_size,
            anchors,
            labels,
            cell_size: input_size as f32 / grid_size as f32,
            tensor_len,
        })
    }

    /// Returns the number of cells per grid side.
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Returns the square model-input resolution in pixels.
    pub fn input_size(&self) -> usize {
        self.input_size
    }

    /// Returns the side length of one grid cell in pixels.
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Returns the anchor priors in tensor order.
    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    /// Returns the number of anchors predicted per cell.
    pub fn anchor_count(&self) -> usize {
        self.anchors.len()
    }

    /// Returns the class labels in tensor order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Returns the number of classes.
    pub fn class_count(&self) -> usize {
        self.labels.len()
    }

    /// Returns the label for a class index, if it exists.
    pub fn label(&self, class_index: usize) -> Option<&str> {
        self.labels.get(class_index).map(String::as_str)
    }

    /// Number of channels stored per anchor.
    pub fn channels_per_anchor(&self) -> usize {
        BOX_CHANNELS + self.labels.len()
    }

    /// Number of `(cell, anchor)` predictions in one output tensor.
    pub fn prediction_count(&self) -> usize {
        self.tensor_len / self.channels_per_anchor()
    }

    /// Expected length of the flat output tensor.
    ///
    /// Checked against `usize` overflow at construction, so every offset
    /// below it is representable too.
    pub fn tensor_len(&self) -> usize {
        self.tensor_len
    }

    /// Offset of the first channel for `(row, col, anchor)`.
    ///
    /// Anchors are contiguous within a cell and cells are row-major.
    pub fn offset(&self, row: usize, col: usize, anchor: usize) -> usize {
        ((row * self.grid_size + col) * self.anchors.len() + anchor) * self.channels_per_anchor()
    }

    /// Fails with `ConfigurationMismatch` if `len` is not the expected tensor
    /// length.
    pub fn check_tensor_len(&self, len: usize) -> YoloGridResult<()> {
        let expected = self.tensor_len();
        if len != expected {
            return Err(YoloGridError::ConfigurationMismatch { expected, got: len });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Anchor, GridGeometry};
    use crate::util::YoloGridError;

    fn small() -> GridGeometry {
        GridGeometry::new(
            2,
            64,
            vec![Anchor::new(1.0, 1.0), Anchor::new(2.0, 3.0)],
            ["a", "b", "c"],
        )
        .unwrap()
    }

    #[test]
    fn derived_sizes_follow_layout() {
        let geometry = small();
        assert_eq!(geometry.channels_per_anchor(), 8);
        assert_eq!(geometry.prediction_count(), 8);
        assert_eq!(geometry.tensor_len(), 64);
        assert!((geometry.cell_size() - 32.0).abs() < 1e-6);
    }

    #[test]
    fn offsets_are_anchor_major_within_row_major_cells() {
        let geometry = small();
        assert_eq!(geometry.offset(0, 0, 0), 0);
        assert_eq!(geometry.offset(0, 0, 1), 8);
        assert_eq!(geometry.offset(0, 1, 0), 16);
        assert_eq!(geometry.offset(1, 0, 0), 32);
        assert_eq!(geometry.offset(1, 1, 1), 56);
    }

    #[test]
    fn check_tensor_len_reports_mismatch() {
        let geometry = small();
        assert!(geometry.check_tensor_len(64).is_ok());
        assert_eq!(
            geometry.check_tensor_len(63),
            Err(YoloGridError::ConfigurationMismatch {
                expected: 64,
                got: 63
            })
        );
    }

    #[test]
    fn label_lookup_is_bounds_checked() {
        let geometry = small();
        assert_eq!(geometry.label(2), Some("c"));
        assert_eq!(geometry.label(3), None);
    }
}
