//! Loading images into the model's input tensor layout.

use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, RgbImage};

use crate::geometry::GridGeometry;
use crate::io::ImageDims;
use crate::util::{YoloGridError, YoloGridResult};

/// Planar model input plus the dimensions of the image it came from.
#[derive(Clone, Debug)]
pub struct InputTensor {
    /// Channel-planar `R, G, B` values in `0..=255`, each plane row-major.
    pub data: Vec<f32>,
    /// Side of the square model input.
    pub input_size: u32,
    /// Size of the image before resizing.
    pub source: ImageDims,
}

impl InputTensor {
    /// Dimensions of the resized model input.
    pub fn model_dims(&self) -> ImageDims {
        ImageDims::square(self.input_size)
    }
}

/// Opens and decodes an image file, mapping failures to `ImageIo`.
pub fn open_image<P: AsRef<Path>>(path: P) -> YoloGridResult<DynamicImage> {
    let path = path.as_ref();
    image::open(path).map_err(|err| YoloGridError::ImageIo {
        reason: format!("{}: {err}", path.display()),
    })
}

/// Opens an image file and converts it with [`preprocess`].
///
/// The decoded image is returned alongside the tensor so callers can draw
/// on it afterwards.
pub fn load_input<P: AsRef<Path>>(
    path: P,
    geometry: &GridGeometry,
) -> YoloGridResult<(DynamicImage, InputTensor)> {
    let img = open_image(path)?;
    let input = preprocess(&img, geometry)?;
    Ok((img, input))
}

/// Resizes `img` to the model input and extracts planar RGB pixels.
pub fn preprocess(img: &DynamicImage, geometry: &GridGeometry) -> YoloGridResult<InputTensor> {
    let source = ImageDims::new(img.width(), img.height());
    if source.width == 0 || source.height == 0 {
        return Err(YoloGridError::ImageIo {
            reason: "image has zero size".to_string(),
        });
    }
    let side = u32::try_from(geometry.input_size()).map_err(|_| YoloGridError::InvalidParameter {
        name: "input_size",
        reason: "does not fit an image dimension",
    })?;

    let rgb = img.to_rgb8();
    let resized = image::imageops::resize(&rgb, side, side, FilterType::Triangle);
    Ok(InputTensor {
        data: planar_rgb(&resized),
        input_size: side,
        source,
    })
}

fn planar_rgb(img: &RgbImage) -> Vec<f32> {
    let plane = (img.width() * img.height()) as usize;
    let mut data = vec![0.0f32; plane * 3];
    for (idx, pixel) in img.pixels().enumerate() {
        data[idx] = pixel[0] as f32;
        data[plane + idx] = pixel[1] as f32;
        data[2 * plane + idx] = pixel[2] as f32;
    }
    data
}
