//! Greedy non-maximum suppression for detections.

use crate::candidate::order::sort_by_confidence_desc;
use crate::candidate::Detection;
use crate::trace::{trace_event, trace_span};
use crate::util::{YoloGridError, YoloGridResult};

/// Validated suppression parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Suppressor {
    max_results: usize,
    overlap_threshold: f32,
}

impl Suppressor {
    /// Creates a suppressor keeping at most `max_results` boxes whose pairwise
    /// IoU does not exceed `overlap_threshold`.
    ///
    /// `overlap_threshold` must lie in `(0, 1]`.
    pub fn new(max_results: usize, overlap_threshold: f32) -> YoloGridResult<Self> {
        check_overlap_threshold(overlap_threshold)?;
        Ok(Self {
            max_results,
            overlap_threshold,
        })
    }

    /// Returns the cap on accepted boxes.
    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Returns the largest IoU tolerated between accepted boxes.
    pub fn overlap_threshold(&self) -> f32 {
        self.overlap_threshold
    }

    /// Selects the highest-confidence boxes that do not overlap each other.
    ///
    /// Suppression is cross-class: a box is dropped if it overlaps any
    /// accepted box by more than the threshold, whatever their labels.
    /// Output is ordered by descending confidence, with ties kept in input
    /// order.
    pub fn filter(&self, candidates: &[Detection]) -> Vec<Detection> {
        let _span = trace_span!(
            DEBUG,
            "suppress",
            candidates = candidates.len(),
            max_results = self.max_results
        )
        .entered();

        if self.max_results == 0 || candidates.is_empty() {
            return Vec::new();
        }

        let mut sorted = candidates.to_vec();
        sort_by_confidence_desc(&mut sorted);

        let mut kept: Vec<Detection> = Vec::with_capacity(self.max_results.min(sorted.len()));
        'outer: for candidate in sorted {
            for accepted in kept.iter() {
                if candidate.bbox.iou(&accepted.bbox) > self.overlap_threshold {
                    continue 'outer;
                }
            }
            kept.push(candidate);
            if kept.len() == self.max_results {
                break;
            }
        }

        trace_event!(DEBUG, "suppressed", kept = kept.len());
        kept
    }
}

/// Runs greedy NMS over `candidates`.
///
/// Shorthand for `Suppressor::new(max_results, overlap_threshold)?.filter(candidates)`.
pub fn suppress(
    candidates: &[Detection],
    max_results: usize,
    overlap_threshold: f32,
) -> YoloGridResult<Vec<Detection>> {
    Ok(Suppressor::new(max_results, overlap_threshold)?.filter(candidates))
}

pub(crate) fn check_overlap_threshold(overlap_threshold: f32) -> YoloGridResult<()> {
    // Written so NaN fails too.
    if !(overlap_threshold > 0.0 && overlap_threshold <= 1.0) {
        return Err(YoloGridError::InvalidParameter {
            name: "overlap_threshold",
            reason: "must lie in (0, 1]",
        });
    }
    Ok(())
}
