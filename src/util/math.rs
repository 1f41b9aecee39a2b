//! Activation functions applied to raw network channels.

/// Logistic sigmoid.
pub(crate) fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Applies a numerically stable softmax to `logits` and returns the index and
/// probability of the most likely class.
///
/// The first index wins ties. `logits` must not be empty.
pub(crate) fn softmax_argmax(logits: &[f32]) -> (usize, f32) {
    let mut best_idx = 0usize;
    let mut max_logit = f32::NEG_INFINITY;
    for (idx, &logit) in logits.iter().enumerate() {
        if logit > max_logit {
            max_logit = logit;
            best_idx = idx;
        }
    }

    // Every logit is -inf (or NaN): nothing to normalize against.
    if max_logit == f32::NEG_INFINITY {
        return (best_idx, 1.0 / logits.len() as f32);
    }
    // +inf logits take all the mass, shared equally between them.
    if max_logit == f32::INFINITY {
        let saturated = logits.iter().filter(|&&logit| logit == f32::INFINITY).count();
        return (best_idx, 1.0 / saturated as f32);
    }

    let sum: f32 = logits.iter().map(|&logit| (logit - max_logit).exp()).sum();
    // exp(0) of the max term is 1, so the best probability is 1 / sum.
    (best_idx, 1.0 / sum)
}
