//! Contracts for the collaborators that feed the engine.
//!
//! Document parsing and raster line detection live outside this crate.
//! The engine only sees what they hand over: a part catalog with optional
//! plate dimensions, or detected line segments in pixel space.
//!
//! ## Modules
//!
//! - [`text_table`]: catalog and plate extraction from a document's text layer
//! - [`json_lines`]: detected lines read from a detector's JSON dump
//! - [`line_merge`]: collapsing near-duplicate detections
//! - [`pixel_mapping`]: pixel to plate coordinate mapping

pub mod json_lines;
pub mod line_merge;
pub mod pixel_mapping;
pub mod text_table;

pub use json_lines::JsonLineDetector;
pub use line_merge::merge_lines;
pub use pixel_mapping::PixelMapping;
pub use text_table::TextTableExtractor;

use crate::error::{CamToolResult, ExtractionError};
use platenest_core::{Orientation, PartSpec, Plate};
use serde::{Deserialize, Serialize};

/// Plate dimensions as declared by a document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlateDimensions {
    /// Horizontal extent (the document's `L`)
    pub width: f64,
    /// Vertical extent (the document's `W`)
    pub height: f64,
}

/// What a document extractor recovered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentExtraction {
    /// `None` when the document does not declare both dimensions
    pub plate: Option<PlateDimensions>,
    pub catalog: Vec<PartSpec>,
}

/// A line segment in image pixel coordinates, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelLine {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl PixelLine {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Coordinate that stays constant along a line of this orientation.
    pub fn primary(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Vertical => self.x1,
            Orientation::Horizontal => self.y1,
        }
    }
}

/// Lines found by a detector, already split by orientation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectedLines {
    pub image_width: u32,
    pub image_height: u32,
    #[serde(default)]
    pub vertical: Vec<PixelLine>,
    #[serde(default)]
    pub horizontal: Vec<PixelLine>,
}

/// Turns a source document into a part catalog and plate dimensions.
pub trait DocumentExtractor {
    type Document: ?Sized;

    fn extract(&self, document: &Self::Document) -> CamToolResult<DocumentExtraction>;
}

/// Finds vertical and horizontal line segments in an image.
pub trait LineDetector {
    type Image: ?Sized;

    fn detect(&self, image: &Self::Image) -> CamToolResult<DetectedLines>;
}

/// Build the plate from extracted dimensions.
///
/// Packing with unknown bounds is refused: absent dimensions are an error,
/// never replaced by defaults.
pub fn plate_from_extraction(dimensions: Option<PlateDimensions>) -> CamToolResult<Plate> {
    let dims = dimensions.ok_or(ExtractionError::MissingPlateDimensions)?;
    Ok(Plate::new(dims.width, dims.height)?)
}
