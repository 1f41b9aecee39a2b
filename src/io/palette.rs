//! Per-class display colors.

/// Fixed RGB palette, cycled by class index.
pub const PALETTE: [[u8; 3]; 20] = [
    [255, 0, 0],
    [0, 128, 0],
    [0, 0, 255],
    [255, 165, 0],
    [128, 0, 128],
    [0, 255, 255],
    [255, 0, 255],
    [255, 215, 0],
    [0, 255, 0],
    [0, 128, 128],
    [255, 192, 203],
    [165, 42, 42],
    [128, 128, 0],
    [0, 0, 128],
    [255, 127, 80],
    [64, 224, 208],
    [128, 0, 0],
    [210, 105, 30],
    [154, 205, 50],
    [112, 128, 144],
];

/// Color used to draw boxes of `class_index`.
pub fn class_color(class_index: usize) -> [u8; 3] {
    PALETTE[class_index % PALETTE.len()]
}
