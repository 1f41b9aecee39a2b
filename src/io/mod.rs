//! Helpers around the core for loading inputs and presenting detections.
//!
//! Rescaling and the class palette are always available. Image loading and
//! drawing need the `image-io` feature.

#[cfg(feature = "image-io")]
pub mod draw;
#[cfg(feature = "image-io")]
mod input;
pub mod palette;

#[cfg(feature = "image-io")]
pub use input::{load_input, open_image, preprocess, InputTensor};

use crate::candidate::BoundingBox;

/// Pixel dimensions of an image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageDims {
    pub width: u32,
    pub height: u32,
}

impl ImageDims {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Dimensions of a square model input.
    pub const fn square(side: u32) -> Self {
        Self::new(side, side)
    }
}

/// Corner-form rectangle in whole pixels, clipped to an image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Maps a model-space box onto a source image of size `source`.
///
/// The box is clipped to the model input first, then scaled linearly per
/// axis by `source / model`. Returns `None` when nothing of the box remains
/// inside the image.
pub fn to_source_space(bbox: &BoundingBox, model: ImageDims, source: ImageDims) -> Option<PixelRect> {
    if bbox.is_empty() || model.width == 0 || model.height == 0 {
        return None;
    }

    let model_w = model.width as f32;
    let model_h = model.height as f32;
    let left = bbox.left().clamp(0.0, model_w);
    let top = bbox.top().clamp(0.0, model_h);
    let right = bbox.right().clamp(0.0, model_w);
    let bottom = bbox.bottom().clamp(0.0, model_h);
    if right <= left || bottom <= top {
        return None;
    }

    let sx = source.width as f32 / model_w;
    let sy = source.height as f32 / model_h;
    let x = (left * sx).floor() as u32;
    let y = (top * sy).floor() as u32;
    let x1 = ((right * sx).ceil() as u32).min(source.width);
    let y1 = ((bottom * sy).ceil() as u32).min(source.height);
    if x1 <= x || y1 <= y {
        return None;
    }

    Some(PixelRect {
        x,
        y,
        width: x1 - x,
        height: y1 - y,
    })
}
