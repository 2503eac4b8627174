//! SVG debug preview of a layout and its cuts.
//! Colours follow the cut passes:
//! - Plate outline black, parts light grey
//! - Vertical cuts blue, horizontal cuts green
//!
//! Plate coordinates are bottom-left based, SVG is top-down, so every Y is
//! flipped through the plate height.

use platenest_core::{CutSegment, PlacedRect, Plate};
use std::fmt::Write;

const PADDING: f64 = 20.0;
const TARGET_WIDTH: f64 = 800.0;

/// Render the plate, placed parts and both cut lists as a standalone SVG.
pub fn render_svg_preview(
    plate: &Plate,
    placed: &[PlacedRect],
    vertical: &[CutSegment],
    horizontal: &[CutSegment],
) -> String {
    let scale = TARGET_WIDTH / plate.width;
    let view_w = plate.width * scale + 2.0 * PADDING;
    let view_h = plate.height * scale + 2.0 * PADDING;

    let to_px = |x: f64, y: f64| -> (f64, f64) {
        (PADDING + x * scale, PADDING + (plate.height - y) * scale)
    };

    let mut svg = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {:.2} {:.2}">"#,
        view_w, view_h, view_w, view_h
    );
    let _ = writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#);

    let (px, py) = to_px(0.0, plate.height);
    let _ = writeln!(
        svg,
        r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="none" stroke="black" stroke-width="2"/>"#,
        px,
        py,
        plate.width * scale,
        plate.height * scale
    );

    let _ = writeln!(svg, r#"<g id="parts" fill="rgb(220,220,220)" stroke="rgb(150,150,150)" stroke-width="1">"#);
    for rect in placed {
        let (rx, ry) = to_px(rect.x, rect.top());
        let _ = writeln!(
            svg,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}"/>"#,
            rx,
            ry,
            rect.w * scale,
            rect.h * scale
        );
    }
    let _ = writeln!(svg, "</g>");

    write_cuts(&mut svg, "vertical-cuts", "blue", vertical, &to_px);
    write_cuts(&mut svg, "horizontal-cuts", "rgb(0,200,0)", horizontal, &to_px);

    svg.push_str("</svg>\n");
    svg
}

fn write_cuts(
    svg: &mut String,
    id: &str,
    color: &str,
    cuts: &[CutSegment],
    to_px: &impl Fn(f64, f64) -> (f64, f64),
) {
    let _ = writeln!(svg, r#"<g id="{}" stroke="{}" stroke-width="2">"#, id, color);
    for seg in cuts {
        let (x1, y1) = to_px(seg.x1, seg.y1);
        let (x2, y2) = to_px(seg.x2, seg.y2);
        let _ = writeln!(
            svg,
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}"/>"#,
            x1, y1, x2, y2
        );
    }
    let _ = writeln!(svg, "</g>");
}
