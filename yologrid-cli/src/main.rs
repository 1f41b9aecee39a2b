mod config;
mod tensor_file;

use ab_glyph::FontVec;
use clap::Parser;
use config::Config;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;
use yologrid::io::draw::{draw_detections, DrawStyle};
use yologrid::io::{load_input, open_image, to_source_space, ImageDims, PixelRect};
use yologrid::{DetectConfig, Detection, Detector, GridGeometry};

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "Decode and filter grid detector output (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Log per-image results and pipeline spans.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Serialize)]
struct RectRecord {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

impl From<PixelRect> for RectRecord {
    fn from(value: PixelRect) -> Self {
        Self {
            x: value.x,
            y: value.y,
            width: value.width,
            height: value.height,
        }
    }
}

#[derive(Debug, Serialize)]
struct DetectionRecord {
    label: String,
    confidence: f32,
    center: [f32; 2],
    size: [f32; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    source_rect: Option<RectRecord>,
}

#[derive(Debug, Serialize)]
struct ImageRecord {
    name: String,
    detections: Vec<DetectionRecord>,
}

#[derive(Debug, Serialize)]
struct Output {
    images: Vec<ImageRecord>,
}

fn detection_record(
    det: &Detection,
    geometry: &GridGeometry,
    source: Option<ImageDims>,
) -> DetectionRecord {
    let model = ImageDims::square(geometry.input_size() as u32);
    DetectionRecord {
        label: det.label(geometry).unwrap_or("unknown").to_string(),
        confidence: det.confidence,
        center: [det.bbox.center_x, det.bbox.center_y],
        size: [det.bbox.width, det.bbox.height],
        source_rect: source
            .and_then(|dims| to_source_space(&det.bbox, model, dims))
            .map(RectRecord::from),
    }
}

fn log_detections(name: &str, detections: &[Detection], geometry: &GridGeometry) {
    info!("Image {name} results");
    for det in detections {
        let label = det.label(geometry).unwrap_or("unknown");
        info!("Tag: {label} Confidence score: {}", det.confidence);
    }
}

fn save_drawing(
    path: &Path,
    image: &image::DynamicImage,
    detections: &[Detection],
    geometry: &GridGeometry,
    style: &DrawStyle,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut canvas = image.to_rgb8();
    draw_detections(&mut canvas, detections, geometry, style);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    canvas.save(path)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env()
                    .add_directive("yologrid=info".parse()?)
                    .add_directive("yologrid_cli=info".parse()?),
            )
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.images.is_empty() {
        return Err("images must list at least one entry".into());
    }
    if config.images.iter().any(|job| job.draw_path.is_some() && job.image_path.is_none()) {
        return Err("draw_path requires image_path".into());
    }
    if config
        .images
        .iter()
        .any(|job| job.input_tensor_path.is_some() && job.image_path.is_none())
    {
        return Err("input_tensor_path requires image_path".into());
    }

    let geometry = config.geometry.build()?;
    let detector = Detector::new(geometry).try_with_config(DetectConfig::from(&config.detect))?;
    let geometry = detector.geometry();

    let style = DrawStyle {
        font: match &config.font_path {
            Some(path) => Some(FontVec::try_from_vec(fs::read(path)?)?),
            None => None,
        },
    };

    let mut images = Vec::with_capacity(config.images.len());
    let mut tensors = Vec::with_capacity(config.images.len());
    for job in &config.images {
        let image = match (&job.image_path, &job.input_tensor_path) {
            (Some(image_path), Some(input_path)) => {
                let (image, input) = load_input(image_path, geometry)?;
                tensor_file::write_tensor(Path::new(input_path), &input.data)?;
                Some(image)
            }
            (Some(image_path), None) => Some(open_image(image_path)?),
            (None, _) => None,
        };
        tensors.push(tensor_file::read_tensor(Path::new(&job.tensor_path))?);
        images.push(image);
    }

    let results = detector.detect_batch(&tensors)?;

    let mut records = Vec::with_capacity(results.len());
    for ((job, image), detections) in config.images.iter().zip(&images).zip(&results) {
        log_detections(&job.name, detections, geometry);

        if let (Some(image), Some(path)) = (image, &job.draw_path) {
            save_drawing(Path::new(path), image, detections, geometry, &style)?;
        }

        let source = image
            .as_ref()
            .map(|img| ImageDims::new(img.width(), img.height()));
        records.push(ImageRecord {
            name: job.name.clone(),
            detections: detections
                .iter()
                .map(|det| detection_record(det, geometry, source))
                .collect(),
        });
    }

    let json = serde_json::to_string_pretty(&Output { images: records })?;
    match config.output_path {
        Some(path) => {
            if let Some(parent) = Path::new(&path).parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, json)?
        }
        None => println!("{json}"),
    }

    Ok(())
}
