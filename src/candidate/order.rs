//! Deterministic confidence ordering for detections.

use std::cmp::Ordering;

use crate::candidate::Detection;

/// NaN confidences rank below every real value.
fn rank_key(confidence: f32) -> f32 {
    if confidence.is_nan() {
        f32::NEG_INFINITY
    } else {
        confidence
    }
}

pub(crate) fn confidence_cmp_desc(a: &Detection, b: &Detection) -> Ordering {
    rank_key(b.confidence).total_cmp(&rank_key(a.confidence))
}

/// Sorts detections by descending confidence.
///
/// The sort is stable, so equal confidences keep their input order.
pub(crate) fn sort_by_confidence_desc(detections: &mut [Detection]) {
    detections.sort_by(confidence_cmp_desc);
}
