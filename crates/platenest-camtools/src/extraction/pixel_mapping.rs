//! Pixel to plate coordinate mapping for detected lines.

use super::{DetectedLines, PixelLine};
use crate::error::{CamToolResult, ParameterError};
use platenest_core::{CutSegment, Plate};

/// Affine map from image pixels (origin top-left) to plate coordinates
/// (origin bottom-left). X and Y scale independently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelMapping {
    x_scale: f64,
    y_scale: f64,
    image_height: f64,
}

impl PixelMapping {
    pub fn new(image_width: u32, image_height: u32, plate: &Plate) -> CamToolResult<Self> {
        if image_width == 0 || image_height == 0 {
            return Err(ParameterError::InvalidDimensions(format!(
                "image is {}x{} pixels",
                image_width, image_height
            ))
            .into());
        }
        Ok(Self {
            x_scale: plate.width / image_width as f64,
            y_scale: plate.height / image_height as f64,
            image_height: image_height as f64,
        })
    }

    pub fn map_point(&self, x: i32, y: i32) -> (f64, f64) {
        (
            x as f64 * self.x_scale,
            (self.image_height - y as f64) * self.y_scale,
        )
    }

    pub fn map_line(&self, line: &PixelLine) -> CutSegment {
        let (x1, y1) = self.map_point(line.x1, line.y1);
        let (x2, y2) = self.map_point(line.x2, line.y2);
        CutSegment::new(x1, y1, x2, y2)
    }

    pub fn map_lines(&self, lines: &[PixelLine]) -> Vec<CutSegment> {
        lines.iter().map(|line| self.map_line(line)).collect()
    }

    /// Mapping for a detection result, using its own image size.
    pub fn for_detection(detected: &DetectedLines, plate: &Plate) -> CamToolResult<Self> {
        Self::new(detected.image_width, detected.image_height, plate)
    }
}
