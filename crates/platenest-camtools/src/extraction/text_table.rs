//! Part catalog extraction from a document's text layer.
//!
//! The header declares the plate as `W : <num>` (vertical extent) and
//! `L : <num>` (horizontal extent). Each part row starts with a marker
//! word followed by two free tokens and the two part dimensions; the
//! larger dimension is taken as the part length. Rows with identical
//! dimensions are merged into one entry counting their occurrences.

use super::{DocumentExtraction, DocumentExtractor, PlateDimensions};
use crate::error::{CamToolResult, ExtractionError};
use platenest_core::PartSpec;
use regex::Regex;
use tracing::{debug, warn};

/// Row marker used by the cutting sheets this extractor was written for.
pub const DEFAULT_ROW_MARKER: &str = "절단";

/// Regex based extractor over plain document text.
#[derive(Debug, Clone)]
pub struct TextTableExtractor {
    width_re: Regex,
    length_re: Regex,
    row_re: Regex,
}

impl TextTableExtractor {
    /// Build an extractor recognizing part rows that start with `row_marker`.
    pub fn new(row_marker: &str) -> Result<Self, ExtractionError> {
        let row_pattern = format!(
            r"{}\s+\S+\s+\S+\s+(\d+(?:\.\d+)?)\s+(\d+(?:\.\d+)?)",
            regex::escape(row_marker)
        );
        Ok(Self {
            width_re: Regex::new(r"(?i)W\s*:\s*([0-9.]+)")?,
            length_re: Regex::new(r"(?i)L\s*:\s*([0-9.]+)")?,
            row_re: Regex::new(&row_pattern)?,
        })
    }

    /// Plate dimensions from the header, `None` unless both are present.
    pub fn plate_dimensions(&self, text: &str) -> Option<PlateDimensions> {
        let width = first_number(&self.width_re, text);
        let length = first_number(&self.length_re, text);
        match (width, length) {
            (Some(w), Some(l)) => Some(PlateDimensions {
                width: l,
                height: w,
            }),
            _ => {
                warn!(
                    found_w = width.is_some(),
                    found_l = length.is_some(),
                    "Plate dimensions not found in document header"
                );
                None
            }
        }
    }

    /// Part rows merged by identical (length, width), first-seen order.
    pub fn catalog(&self, text: &str) -> Vec<PartSpec> {
        let mut catalog: Vec<PartSpec> = Vec::new();
        for caps in self.row_re.captures_iter(text) {
            let (Ok(a), Ok(b)) = (caps[1].parse::<f64>(), caps[2].parse::<f64>()) else {
                continue;
            };
            let (length, width) = (a.max(b), a.min(b));
            match catalog
                .iter_mut()
                .find(|p| p.length == length && p.width == width)
            {
                Some(existing) => existing.quantity += 1,
                None => catalog.push(PartSpec::new(length, width, 1)),
            }
        }
        debug!(part_types = catalog.len(), "Extracted part table");
        catalog
    }
}

impl Default for TextTableExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_ROW_MARKER).expect("default extraction patterns are valid")
    }
}

impl DocumentExtractor for TextTableExtractor {
    type Document = str;

    fn extract(&self, document: &str) -> CamToolResult<DocumentExtraction> {
        Ok(DocumentExtraction {
            plate: self.plate_dimensions(document),
            catalog: self.catalog(document),
        })
    }
}

fn first_number(re: &Regex, text: &str) -> Option<f64> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
