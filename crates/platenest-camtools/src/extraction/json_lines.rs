//! Detected lines handed over as JSON by an external detector.
//!
//! The dump carries the source image size and the raw pixel segments per
//! orientation. Fragments are merged here so the detector can stay dumb.

use super::line_merge::{merge_lines, DEFAULT_MERGE_TOLERANCE};
use super::{DetectedLines, LineDetector};
use crate::error::CamToolResult;
use platenest_core::Orientation;
use tracing::debug;

/// [`LineDetector`] over a JSON dump of [`DetectedLines`].
#[derive(Debug, Clone)]
pub struct JsonLineDetector {
    merge_tolerance: i32,
}

impl JsonLineDetector {
    pub fn new(merge_tolerance: i32) -> Self {
        Self { merge_tolerance }
    }
}

impl Default for JsonLineDetector {
    fn default() -> Self {
        Self::new(DEFAULT_MERGE_TOLERANCE)
    }
}

impl LineDetector for JsonLineDetector {
    type Image = str;

    fn detect(&self, image: &str) -> CamToolResult<DetectedLines> {
        let raw: DetectedLines = serde_json::from_str(image)?;
        let detected = DetectedLines {
            vertical: merge_lines(&raw.vertical, Orientation::Vertical, self.merge_tolerance),
            horizontal: merge_lines(&raw.horizontal, Orientation::Horizontal, self.merge_tolerance),
            ..raw
        };
        debug!(
            vertical = detected.vertical.len(),
            horizontal = detected.horizontal.len(),
            "Loaded detected lines"
        );
        Ok(detected)
    }
}
