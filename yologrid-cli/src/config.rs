//! JSON configuration mirroring the library's geometry and detection settings.

use serde::Deserialize;
use std::error::Error;
use yologrid::{Anchor, DetectConfig, GridGeometry};

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum PresetConfig {
    TinyYoloV2Voc,
}

/// Either a named preset or an explicit layout.
///
/// An empty object selects Tiny YOLO v2 / VOC. Naming a preset together with
/// explicit fields is rejected rather than silently picking one.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GeometryJson {
    pub preset: Option<PresetConfig>,
    pub grid_size: usize,
    pub input_size: usize,
    pub anchors: Vec<[f32; 2]>,
    pub labels: Vec<String>,
}

impl GeometryJson {
    fn has_explicit_fields(&self) -> bool {
        self.grid_size != 0
            || self.input_size != 0
            || !self.anchors.is_empty()
            || !self.labels.is_empty()
    }

    pub fn build(&self) -> Result<GridGeometry, Box<dyn Error>> {
        if self.has_explicit_fields() {
            if self.preset.is_some() {
                return Err(
                    "geometry: preset cannot be combined with grid_size, input_size, anchors or labels"
                        .into(),
                );
            }
            let anchors = self.anchors.iter().map(|[w, h]| Anchor::new(*w, *h)).collect();
            return Ok(GridGeometry::new(
                self.grid_size,
                self.input_size,
                anchors,
                self.labels.iter().cloned(),
            )?);
        }
        match self.preset.unwrap_or(PresetConfig::TinyYoloV2Voc) {
            PresetConfig::TinyYoloV2Voc => Ok(GridGeometry::tiny_yolo_v2_voc()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DetectConfigJson {
    pub max_results: usize,
    pub overlap_threshold: f32,
    pub min_confidence: f32,
    pub parallel: bool,
}

impl Default for DetectConfigJson {
    fn default() -> Self {
        let cfg = DetectConfig::default();
        Self {
            max_results: cfg.max_results,
            overlap_threshold: cfg.overlap_threshold,
            min_confidence: cfg.min_confidence,
            parallel: cfg.parallel,
        }
    }
}

impl From<&DetectConfigJson> for DetectConfig {
    fn from(value: &DetectConfigJson) -> Self {
        Self {
            max_results: value.max_results,
            overlap_threshold: value.overlap_threshold,
            min_confidence: value.min_confidence,
            parallel: value.parallel,
        }
    }
}

/// One image's worth of work.
#[derive(Debug, Deserialize)]
pub struct ImageJob {
    /// Name used in logs and the report.
    pub name: String,
    /// Raw network output for this image.
    pub tensor_path: String,
    /// Source image; needed for source-space boxes, drawing and input export.
    pub image_path: Option<String>,
    /// Where to save the source image with boxes drawn on it.
    pub draw_path: Option<String>,
    /// Where to write the preprocessed model input tensor.
    pub input_tensor_path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub geometry: GeometryJson,
    pub detect: DetectConfigJson,
    pub font_path: Option<String>,
    pub output_path: Option<String>,
    pub images: Vec<ImageJob>,
}
