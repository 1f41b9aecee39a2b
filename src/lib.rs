//! yologrid decodes fixed-grid object-detector output into labeled boxes.
//!
//! A network such as Tiny YOLO v2 emits, for every grid cell and anchor, a box
//! offset, an objectness logit and one logit per class. [`Decoder`] turns that
//! flat tensor into scored candidates in model-input pixel space and
//! [`Suppressor`] reduces them to a small set of non-overlapping detections.
//! [`Detector`] chains both with a [`DetectConfig`], optionally processing
//! batches in parallel via the `rayon` feature.
//!
//! Running the network is left to the caller. With the `image-io` feature the
//! [`io`] module loads images into the model input layout and draws results.

mod candidate;
pub mod decode;
pub mod detector;
pub mod geometry;
pub mod io;
mod trace;
pub mod util;

pub use candidate::nms::{suppress, Suppressor};
pub use candidate::{BoundingBox, Detection};
pub use decode::Decoder;
pub use detector::{DetectConfig, Detector};
pub use geometry::{Anchor, GridGeometry};
pub use util::{YoloGridError, YoloGridResult};
