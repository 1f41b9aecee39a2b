use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use yologrid::{suppress, BoundingBox, Detection, Suppressor};

fn det(cx: f32, cy: f32, w: f32, h: f32, confidence: f32, class_index: usize) -> Detection {
    Detection {
        bbox: BoundingBox::new(cx, cy, w, h),
        confidence,
        class_index,
    }
}

fn random_detections(rng: &mut StdRng, count: usize) -> Vec<Detection> {
    (0..count)
        .map(|_| {
            det(
                rng.random_range(0.0f32..200.0),
                rng.random_range(0.0f32..200.0),
                rng.random_range(0.0f32..80.0),
                rng.random_range(0.0f32..80.0),
                rng.random_range(0.0f32..=1.0),
                rng.random_range(0..4usize),
            )
        })
        .collect()
}

#[test]
fn identical_boxes_keep_only_the_most_confident() {
    let candidates = [
        det(10.0, 10.0, 20.0, 20.0, 0.6, 0),
        det(10.0, 10.0, 20.0, 20.0, 0.9, 0),
    ];
    let kept = suppress(&candidates, 5, 0.5).unwrap();
    assert_eq!(kept, vec![candidates[1]]);
}

#[test]
fn distant_boxes_are_both_kept_in_confidence_order() {
    let candidates = [
        det(1000.0, 1000.0, 20.0, 20.0, 0.8, 0),
        det(0.0, 0.0, 20.0, 20.0, 0.9, 0),
    ];
    let kept = suppress(&candidates, 5, 0.5).unwrap();
    assert_eq!(kept, vec![candidates[1], candidates[0]]);
}

#[test]
fn max_results_one_keeps_the_best_box() {
    let candidates = [
        det(0.0, 0.0, 10.0, 10.0, 0.8, 0),
        det(100.0, 0.0, 10.0, 10.0, 0.95, 1),
        det(200.0, 0.0, 10.0, 10.0, 0.9, 2),
    ];
    let kept = suppress(&candidates, 1, 0.5).unwrap();
    assert_eq!(kept, vec![candidates[1]]);
}

#[test]
fn empty_input_and_zero_budget_yield_nothing() {
    assert!(suppress(&[], 5, 0.5).unwrap().is_empty());
    assert!(suppress(&[], 0, 1.0).unwrap().is_empty());

    let candidates = [det(0.0, 0.0, 10.0, 10.0, 0.9, 0)];
    assert!(suppress(&candidates, 0, 0.5).unwrap().is_empty());
}

#[test]
fn mutually_overlapping_boxes_collapse_to_one() {
    let candidates: Vec<_> = (0..6)
        .map(|i| det(50.0 + i as f32, 50.0, 40.0, 40.0, 0.5 + 0.05 * i as f32, i))
        .collect();
    let kept = suppress(&candidates, 10, 0.5).unwrap();
    assert_eq!(kept, vec![candidates[5]]);
}

#[test]
fn equal_confidences_keep_input_order() {
    let candidates = [
        det(0.0, 0.0, 10.0, 10.0, 0.7, 3),
        det(100.0, 0.0, 10.0, 10.0, 0.7, 1),
        det(200.0, 0.0, 10.0, 10.0, 0.7, 2),
    ];
    let kept = suppress(&candidates, 5, 0.5).unwrap();
    assert_eq!(kept, candidates.to_vec());
}

#[test]
fn random_sets_respect_length_and_overlap_bounds() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let count = rng.random_range(0..60usize);
        let candidates = random_detections(&mut rng, count);
        let max_results = rng.random_range(0..12usize);
        let threshold = rng.random_range(0.05f32..=1.0);

        let kept = suppress(&candidates, max_results, threshold).unwrap();
        assert!(kept.len() <= max_results.min(candidates.len()));

        for (i, a) in kept.iter().enumerate() {
            for b in kept.iter().skip(i + 1) {
                assert!(a.bbox.iou(&b.bbox) <= threshold);
            }
        }
        for pair in kept.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
        }
        for det in &kept {
            assert!(candidates.contains(det));
        }
    }
}

#[test]
fn random_sets_are_idempotent() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..100 {
        let count = rng.random_range(1..50usize);
        let candidates = random_detections(&mut rng, count);
        let threshold = rng.random_range(0.1f32..=0.9);
        let suppressor = Suppressor::new(8, threshold).unwrap();

        let once = suppressor.filter(&candidates);
        let twice = suppressor.filter(&once);
        assert_eq!(once, twice);
    }
}

#[test]
fn greedy_choice_matches_reference_scan() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..50 {
        let candidates = random_detections(&mut rng, 40);
        let threshold = 0.3;
        let kept = suppress(&candidates, usize::MAX, threshold).unwrap();

        // Every dropped box overlaps a more confident kept box.
        for det in &candidates {
            if kept.contains(det) {
                continue;
            }
            let blocked = kept.iter().any(|k| {
                k.confidence >= det.confidence && k.bbox.iou(&det.bbox) > threshold
            });
            assert!(blocked, "{det:?} dropped without a blocking box");
        }
    }
}
