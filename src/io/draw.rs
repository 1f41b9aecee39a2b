//! Rendering detections onto source images.

use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;

use crate::candidate::Detection;
use crate::geometry::GridGeometry;
use crate::io::palette::class_color;
use crate::io::{to_source_space, ImageDims};

const BOX_THICKNESS: u32 = 3;
const LABEL_FONT_SIZE: f32 = 12.0;
const LABEL_BAR_HEIGHT: u32 = 14;
const LABEL_TEXT_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

/// Draw settings shared across images.
#[derive(Default)]
pub struct DrawStyle {
    /// Font for label text. Without one only the colored label bar is drawn.
    pub font: Option<FontVec>,
}

/// Caption drawn above a box, e.g. `dog (87%)`.
pub fn caption(det: &Detection, geometry: &GridGeometry) -> String {
    let label = det.label(geometry).unwrap_or("unknown");
    format!("{} ({:.0}%)", label, det.confidence * 100.0)
}

/// Draws `detections` (in model-input space) onto `image`.
///
/// Boxes are rescaled from `geometry.input_size()` to the image size and
/// clipped to its bounds; boxes entirely outside the image are skipped.
pub fn draw_detections(
    image: &mut RgbImage,
    detections: &[Detection],
    geometry: &GridGeometry,
    style: &DrawStyle,
) {
    let model = ImageDims::square(geometry.input_size() as u32);
    let source = ImageDims::new(image.width(), image.height());

    for det in detections {
        let Some(rect) = to_source_space(&det.bbox, model, source) else {
            continue;
        };
        let color = Rgb(class_color(det.class_index));

        for inset in 0..BOX_THICKNESS {
            if rect.width <= 2 * inset || rect.height <= 2 * inset {
                break;
            }
            let r = Rect::at((rect.x + inset) as i32, (rect.y + inset) as i32)
                .of_size(rect.width - 2 * inset, rect.height - 2 * inset);
            draw_hollow_rect_mut(image, r, color);
        }

        let text = caption(det, geometry);
        let scale = PxScale::from(LABEL_FONT_SIZE);
        let (text_w, text_h) = match &style.font {
            Some(font) => text_size(scale, font, &text),
            None => (rect.width, LABEL_BAR_HEIGHT),
        };
        let bar_h = text_h.max(1) + 1;
        let bar_y = rect.y as i32 - bar_h as i32;
        let bar = Rect::at(rect.x as i32, bar_y.max(0)).of_size(text_w.max(1), bar_h);
        draw_filled_rect_mut(image, bar, color);
        if let Some(font) = &style.font {
            draw_text_mut(
                image,
                LABEL_TEXT_COLOR,
                rect.x as i32,
                bar_y.max(0),
                scale,
                font,
                &text,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{caption, draw_detections, DrawStyle};
    use crate::candidate::{BoundingBox, Detection};
    use crate::geometry::{Anchor, GridGeometry};
    use crate::io::palette::class_color;
    use image::{Rgb, RgbImage};

    fn geometry() -> GridGeometry {
        GridGeometry::new(4, 100, vec![Anchor::new(1.0, 1.0)], ["cat", "dog"]).unwrap()
    }

    #[test]
    fn caption_uses_label_and_rounded_percent() {
        let det = Detection {
            bbox: BoundingBox::new(0.0, 0.0, 1.0, 1.0),
            confidence: 0.874,
            class_index: 1,
        };
        assert_eq!(caption(&det, &geometry()), "dog (87%)");
    }

    #[test]
    fn draws_rescaled_outline_in_class_color() {
        let mut image = RgbImage::new(200, 200);
        let det = Detection {
            bbox: BoundingBox::new(50.0, 50.0, 40.0, 40.0),
            confidence: 0.9,
            class_index: 1,
        };
        draw_detections(&mut image, &[det], &geometry(), &DrawStyle::default());

        let color = Rgb(class_color(1));
        // Model box [30, 70] maps to [60, 140] in a 2x larger image.
        assert_eq!(*image.get_pixel(60, 100), color);
        assert_eq!(*image.get_pixel(62, 100), color);
        assert_eq!(*image.get_pixel(139, 100), color);
        assert_eq!(*image.get_pixel(100, 100), Rgb([0, 0, 0]));
    }

    #[test]
    fn boxes_outside_the_image_are_ignored() {
        let mut image = RgbImage::new(50, 50);
        let det = Detection {
            bbox: BoundingBox::new(500.0, 500.0, 10.0, 10.0),
            confidence: 0.9,
            class_index: 0,
        };
        draw_detections(&mut image, &[det], &geometry(), &DrawStyle::default());
        assert!(image.pixels().all(|p| *p == Rgb([0, 0, 0])));
    }
}
