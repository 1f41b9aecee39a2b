//! Known network geometries.

use super::{Anchor, GridGeometry, BOX_CHANNELS};

/// Pascal VOC class names in the order Tiny YOLO v2 emits them.
pub const VOC_LABELS: [&str; 20] = [
    "aeroplane",
    "bicycle",
    "bird",
    "boat",
    "bottle",
    "bus",
    "car",
    "cat",
    "chair",
    "cow",
    "diningtable",
    "dog",
    "horse",
    "motorbike",
    "person",
    "pottedplant",
    "sheep",
    "sofa",
    "train",
    "tvmonitor",
];

const TINY_YOLO_V2_ANCHORS: [Anchor; 5] = [
    Anchor::new(1.08, 1.19),
    Anchor::new(3.42, 4.41),
    Anchor::new(6.63, 11.38),
    Anchor::new(9.42, 5.11),
    Anchor::new(16.62, 10.52),
];

impl GridGeometry {
    /// Tiny YOLO v2 trained on Pascal VOC: 416x416 input, 13x13 grid,
    /// 5 anchors, 20 classes.
    pub fn tiny_yolo_v2_voc() -> Self {
        Self {
            grid_size: 13,
            input_size: 416,
            anchors: TINY_YOLO_V2_ANCHORS.to_vec(),
            labels: VOC_LABELS.iter().map(|s| s.to_string()).collect(),
            cell_size: 32.0,
            tensor_len: 13 * 13 * TINY_YOLO_V2_ANCHORS.len() * (BOX_CHANNELS + VOC_LABELS.len()),
        }
    }
}
