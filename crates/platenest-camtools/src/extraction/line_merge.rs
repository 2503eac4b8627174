//! Collapse clusters of near-duplicate detections into single lines.
//!
//! A detector usually reports one drawn edge as several parallel fragments.
//! Lines are sorted by their constant coordinate and chained into a group
//! while each line stays within `tolerance` of the previous one; every group
//! becomes one line at the group's average position spanning the full
//! extent of its members.

use super::PixelLine;
use platenest_core::Orientation;

/// Default clustering distance in pixels.
pub const DEFAULT_MERGE_TOLERANCE: i32 = 10;

/// Merge near-duplicate lines of one orientation.
pub fn merge_lines(lines: &[PixelLine], orientation: Orientation, tolerance: i32) -> Vec<PixelLine> {
    let mut sorted = lines.to_vec();
    sorted.sort_by_key(|line| line.primary(orientation));

    let mut merged = Vec::new();
    let mut group: Vec<PixelLine> = Vec::new();
    for line in sorted {
        if let Some(prev) = group.last() {
            if (line.primary(orientation) - prev.primary(orientation)).abs() >= tolerance {
                merged.push(average_group(&group, orientation));
                group.clear();
            }
        }
        group.push(line);
    }
    if !group.is_empty() {
        merged.push(average_group(&group, orientation));
    }
    merged
}

fn average_group(group: &[PixelLine], orientation: Orientation) -> PixelLine {
    let n = group.len() as i64;
    match orientation {
        Orientation::Vertical => {
            let sum: i64 = group.iter().map(|l| l.x1 as i64 + l.x2 as i64).sum();
            let x = (sum / (2 * n)) as i32;
            let min_y = group.iter().map(|l| l.y1.min(l.y2)).min().unwrap_or_default();
            let max_y = group.iter().map(|l| l.y1.max(l.y2)).max().unwrap_or_default();
            PixelLine::new(x, min_y, x, max_y)
        }
        Orientation::Horizontal => {
            let sum: i64 = group.iter().map(|l| l.y1 as i64 + l.y2 as i64).sum();
            let y = (sum / (2 * n)) as i32;
            let min_x = group.iter().map(|l| l.x1.min(l.x2)).min().unwrap_or_default();
            let max_x = group.iter().map(|l| l.x1.max(l.x2)).max().unwrap_or_default();
            PixelLine::new(min_x, y, max_x, y)
        }
    }
}
