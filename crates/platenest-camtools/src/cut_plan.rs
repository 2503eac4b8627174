//! Final cut lists handed to the toolpath serializer.
//!
//! The packer already discovers every cut; this module owns the optional
//! remnant pass, which stretches the off-cuts of the rightmost column to
//! the plate edge so the unused strip is separated in the same run.

use crate::layout_packer::NestingLayout;
use platenest_core::{CutSegment, Plate};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Distance from the rightmost cut end within which a horizontal cut is
/// considered part of the last column.
pub const REMNANT_TOLERANCE: f64 = 1.0;

/// Extend the horizontal cuts that end at the rightmost reached x to the
/// plate's right edge.
///
/// Pure: the input is left untouched and a new list is returned. Cuts whose
/// right end is not within [`REMNANT_TOLERANCE`] of the maximum belong to
/// interior columns and are copied unchanged.
pub fn extend_remnant(plate: &Plate, horizontal_cuts: &[CutSegment]) -> Vec<CutSegment> {
    let Some(max_x) = horizontal_cuts.iter().map(|seg| seg.x2).reduce(f64::max) else {
        return Vec::new();
    };

    let extended: Vec<CutSegment> = horizontal_cuts
        .iter()
        .map(|seg| {
            if (seg.x2 - max_x).abs() < REMNANT_TOLERANCE {
                seg.with_x2(plate.width)
            } else {
                *seg
            }
        })
        .collect();

    debug!(
        max_x,
        plate_width = plate.width,
        extended = extended
            .iter()
            .zip(horizontal_cuts)
            .filter(|(new, old)| new.x2 != old.x2)
            .count(),
        "Remnant extension applied"
    );
    extended
}

/// Vertical and horizontal cuts in emission order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CutPlan {
    pub vertical: Vec<CutSegment>,
    pub horizontal: Vec<CutSegment>,
}

impl CutPlan {
    pub fn new(vertical: Vec<CutSegment>, horizontal: Vec<CutSegment>) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }

    /// Take the cuts discovered by the packer, optionally running the
    /// remnant pass over the horizontal ones.
    pub fn from_layout(layout: &NestingLayout, extend_remnant_cuts: bool) -> Self {
        let horizontal = if extend_remnant_cuts {
            extend_remnant(&layout.plate, &layout.horizontal_cuts)
        } else {
            layout.horizontal_cuts.clone()
        };
        Self::new(layout.vertical_cuts.clone(), horizontal)
    }

    pub fn is_empty(&self) -> bool {
        self.vertical.is_empty() && self.horizontal.is_empty()
    }

    pub fn len(&self) -> usize {
        self.vertical.len() + self.horizontal.len()
    }

    /// Total engaged travel of the tool.
    pub fn cut_length(&self) -> f64 {
        self.vertical
            .iter()
            .chain(&self.horizontal)
            .map(CutSegment::length)
            .sum()
    }
}
