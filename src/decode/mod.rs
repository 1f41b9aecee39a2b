//! Decoding of raw grid activations into detection candidates.
//!
//! The output tensor is a flat `f32` buffer laid out as
//! `[row][col][anchor][channel]`, where each anchor carries
//! `tx, ty, tw, th, objectness` followed by one logit per class. The decoder
//! squashes each channel, places the box in model-input pixel space, and
//! labels it with its most likely class. It never clamps or drops boxes for
//! geometric reasons; that is left to suppression and drawing.

use crate::candidate::{BoundingBox, Detection};
use crate::geometry::{GridGeometry, BOX_CHANNELS};
use crate::trace::{trace_event, trace_span};
use crate::util::math::{sigmoid, softmax_argmax};
use crate::util::{YoloGridError, YoloGridResult};

/// Decoder bound to one grid geometry.
#[derive(Clone, Copy, Debug)]
pub struct Decoder<'g> {
    geometry: &'g GridGeometry,
}

impl<'g> Decoder<'g> {
    /// Creates a decoder for `geometry`.
    pub fn new(geometry: &'g GridGeometry) -> Self {
        Self { geometry }
    }

    /// Returns the geometry this decoder reads tensors with.
    pub fn geometry(&self) -> &'g GridGeometry {
        self.geometry
    }

    /// Decodes every `(cell, anchor)` prediction in `tensor`.
    ///
    /// Returns exactly `grid_size^2 * anchor_count` candidates in tensor order.
    pub fn decode(&self, tensor: &[f32]) -> YoloGridResult<Vec<Detection>> {
        self.decode_filtered(tensor, |_| true)
    }

    /// Decodes `tensor`, keeping only candidates with
    /// `confidence >= min_confidence`.
    ///
    /// Suppressing the result is equivalent to suppressing the output of
    /// [`Decoder::decode`] after dropping the same low-confidence boxes.
    pub fn decode_above(
        &self,
        tensor: &[f32],
        min_confidence: f32,
    ) -> YoloGridResult<Vec<Detection>> {
        check_min_confidence(min_confidence)?;
        self.decode_filtered(tensor, |det| det.confidence >= min_confidence)
    }

    fn decode_filtered<F>(&self, tensor: &[f32], keep: F) -> YoloGridResult<Vec<Detection>>
    where
        F: Fn(&Detection) -> bool,
    {
        let geometry = self.geometry;
        geometry.check_tensor_len(tensor.len())?;

        let grid = geometry.grid_size();
        let _span = trace_span!(
            DEBUG,
            "decode",
            grid = grid,
            anchors = geometry.anchor_count(),
            classes = geometry.class_count()
        )
        .entered();

        let stride = geometry.channels_per_anchor();
        let mut out = Vec::with_capacity(geometry.prediction_count());
        for row in 0..grid {
            for col in 0..grid {
                for anchor in 0..geometry.anchor_count() {
                    let offset = geometry.offset(row, col, anchor);
                    let channels = &tensor[offset..offset + stride];
                    let det = self.decode_anchor(channels, row, col, anchor);
                    if keep(&det) {
                        out.push(det);
                    }
                }
            }
        }

        trace_event!(DEBUG, "decoded", candidates = out.len());
        Ok(out)
    }

    /// Decodes one anchor's channels.
    fn decode_anchor(&self, channels: &[f32], row: usize, col: usize, anchor: usize) -> Detection {
        let geometry = self.geometry;
        let cell = geometry.cell_size();
        let prior = geometry.anchors()[anchor];

        let center_x = (col as f32 + sigmoid(channels[0])) * cell;
        let center_y = (row as f32 + sigmoid(channels[1])) * cell;
        let width = channels[2].exp() * prior.width * cell;
        let height = channels[3].exp() * prior.height * cell;
        let objectness = sigmoid(channels[4]);

        let (class_index, class_prob) = softmax_argmax(&channels[BOX_CHANNELS..]);

        Detection {
            bbox: BoundingBox::new(center_x, center_y, width, height),
            confidence: objectness * class_prob,
            class_index,
        }
    }
}

pub(crate) fn check_min_confidence(min_confidence: f32) -> YoloGridResult<()> {
    if !(0.0..=1.0).contains(&min_confidence) {
        return Err(YoloGridError::InvalidParameter {
            name: "min_confidence",
            reason: "must lie in [0, 1]",
        });
    }
    Ok(())
}
