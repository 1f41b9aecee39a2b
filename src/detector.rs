//! Decode-then-suppress pipeline over a fixed geometry.

use crate::candidate::nms::{check_overlap_threshold, Suppressor};
use crate::candidate::Detection;
use crate::decode::{check_min_confidence, Decoder};
use crate::geometry::GridGeometry;
use crate::trace::trace_span;
use crate::util::YoloGridResult;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Configuration for the detection pipeline.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectConfig {
    /// Maximum number of boxes reported per image.
    pub max_results: usize,
    /// Largest IoU allowed between two reported boxes, in `(0, 1]`.
    pub overlap_threshold: f32,
    /// Candidates below this confidence are dropped during decoding.
    pub min_confidence: f32,
    /// Process batches in parallel (requires the `rayon` feature).
    pub parallel: bool,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            max_results: 5,
            overlap_threshold: 0.5,
            min_confidence: 0.3,
            parallel: false,
        }
    }
}

impl DetectConfig {
    /// Checks that the thresholds are in range.
    pub fn validate(&self) -> YoloGridResult<()> {
        check_overlap_threshold(self.overlap_threshold)?;
        check_min_confidence(self.min_confidence)
    }
}

/// Detector turning raw output tensors into final detections.
#[derive(Clone, Debug)]
pub struct Detector {
    geometry: GridGeometry,
    cfg: DetectConfig,
}

impl Detector {
    /// Creates a detector with the default configuration.
    pub fn new(geometry: GridGeometry) -> Self {
        Self {
            geometry,
            cfg: DetectConfig::default(),
        }
    }

    /// Replaces the configuration after validating it.
    pub fn try_with_config(mut self, cfg: DetectConfig) -> YoloGridResult<Self> {
        cfg.validate()?;
        self.cfg = cfg;
        Ok(self)
    }

    /// Returns the output geometry tensors are decoded against.
    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &DetectConfig {
        &self.cfg
    }

    /// Decodes and suppresses one image's output tensor.
    pub fn detect(&self, tensor: &[f32]) -> YoloGridResult<Vec<Detection>> {
        let _span = trace_span!(INFO, "detect").entered();
        let suppressor = Suppressor::new(self.cfg.max_results, self.cfg.overlap_threshold)?;
        let candidates =
            Decoder::new(&self.geometry).decode_above(tensor, self.cfg.min_confidence)?;
        Ok(suppressor.filter(&candidates))
    }

    /// Runs [`Detector::detect`] for each tensor, returning results in input
    /// order.
    ///
    /// Fails if any tensor has a mismatched length. With the `rayon`
    /// feature and `parallel` set, images are processed on the rayon pool.
    pub fn detect_batch<T>(&self, tensors: &[T]) -> YoloGridResult<Vec<Vec<Detection>>>
    where
        T: AsRef<[f32]> + Sync,
    {
        let _span = trace_span!(INFO, "detect_batch", images = tensors.len()).entered();
        #[cfg(feature = "rayon")]
        {
            if self.cfg.parallel {
                return tensors
                    .par_iter()
                    .map(|tensor| self.detect(tensor.as_ref()))
                    .collect();
            }
        }
        tensors
            .iter()
            .map(|tensor| self.detect(tensor.as_ref()))
            .collect()
    }
}
