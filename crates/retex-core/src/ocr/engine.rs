//! OCR engine wrapper around `pure-onnx-ocr` (pure Rust, no external
//! ONNX Runtime).

use std::time::Instant;

use image::imageops::FilterType;
use image::GenericImageView;
use tracing::{debug, info};

use super::preprocessing::prepare_for_recognition;
use crate::error::DecodeError;
use crate::models::config::OcrConfig;

/// OCR engine for photographed receipts.
pub struct OcrEngine {
    engine: pure_onnx_ocr::engine::OcrEngine,
    config: OcrConfig,
}

impl OcrEngine {
    /// Create an engine from the model files named by the config.
    pub fn from_config(config: OcrConfig) -> Result<Self, DecodeError> {
        let det_path = config.model_path(&config.detection_model);
        let rec_path = config.model_path(&config.recognition_model);
        let dict_path = config.model_path(&config.dictionary);

        let engine = pure_onnx_ocr::engine::OcrEngineBuilder::new()
            .det_model_path(&det_path)
            .rec_model_path(&rec_path)
            .dictionary_path(&dict_path)
            .build()
            .map_err(|e| DecodeError::OcrModelLoad(format!("pure-onnx-ocr: {}", e)))?;

        info!("Loaded OCR engine from {}", config.model_dir.display());

        Ok(Self { engine, config })
    }

    /// Recognize text in raw image bytes.
    ///
    /// The image is converted to grayscale and binarized with a global
    /// Otsu threshold before recognition; the page is treated as a
    /// single uniform block of text, regions joined in reading order.
    pub fn decode_image(&self, image_data: &[u8]) -> Result<String, DecodeError> {
        let image = image::load_from_memory(image_data)
            .map_err(|e| DecodeError::InvalidImage(e.to_string()))?;
        self.recognize(&image)
    }

    /// Recognize text in a decoded image.
    pub fn recognize(&self, image: &image::DynamicImage) -> Result<String, DecodeError> {
        let start = Instant::now();
        let (width, height) = image.dimensions();
        info!("Processing image: {}x{}", width, height);

        // Bound the longer side; detection quality degrades little on
        // receipt photos and inference cost drops sharply.
        let max_size = self.config.max_image_size;
        let image = if max_size > 0 && width.max(height) > max_size {
            debug!("Downscaling image to fit {}px", max_size);
            image.resize(max_size, max_size, FilterType::Triangle)
        } else {
            image.clone()
        };

        let prepared = if self.config.binarize {
            prepare_for_recognition(&image)
        } else {
            image
        };

        let results = self
            .engine
            .run_from_image(&prepared)
            .map_err(|e| DecodeError::OcrRecognition(format!("pure-onnx-ocr: {}", e)))?;

        debug!("OCR returned {} text regions", results.len());

        // Reading order: group regions into rows top-to-bottom, then
        // left-to-right within a row.
        let mut regions: Vec<(f32, f32, String)> = results
            .iter()
            .map(|r| {
                let (x, y) = first_corner(&r.bounding_box);
                (x, y, r.text.replace("[UNK]", " "))
            })
            .collect();

        regions.sort_by(|a, b| {
            let row_a = (a.1 / 20.0) as i32;
            let row_b = (b.1 / 20.0) as i32;
            if row_a != row_b {
                row_a.cmp(&row_b)
            } else {
                a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal)
            }
        });

        let text = regions
            .iter()
            .map(|(_, _, t)| t.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        info!(
            "OCR extracted {} characters in {}ms",
            text.len(),
            start.elapsed().as_millis()
        );

        Ok(text)
    }
}

/// First exterior corner of a detected region's polygon.
fn first_corner(polygon: &pure_onnx_ocr::Polygon<f64>) -> (f32, f32) {
    polygon
        .exterior()
        .coords()
        .next()
        .map(|c| (c.x as f32, c.y as f32))
        .unwrap_or((0.0, 0.0))
}
