//! Toolpath program emission for plate cutting.
//!
//! A program is framed by a header and a footer and carries two passes:
//! every vertical cut first, then every horizontal cut, each in input
//! order. Both passes are always present, an empty pass being just its
//! label. Coordinates are printed with two decimals and are never
//! converted; the unit directive only declares what the caller used.

use platenest_core::{CutSegment, MeasurementSystem};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const PROGRAM_DELIMITER: &str = "%";
pub const PROGRAM_ID: &str = "O1000 (NESTING CUT)";
pub const SAFE_HEIGHT: &str = "G0 Z0.5 (Safe Height)";
pub const VERTICAL_PASS_LABEL: &str = "(--- 1st Pass: VERTICAL ---)";
pub const HORIZONTAL_PASS_LABEL: &str = "(--- 2nd Pass: HORIZONTAL ---)";
pub const TRAVEL_HEIGHT: &str = "G0 Z10.0";
pub const RETURN_HOME: &str = "G0 X0 Y0";
pub const PROGRAM_END: &str = "M30 (End of Program)";

/// Default feed rate written to the program.
/// Coordinates are written with two decimals.
pub const COORDINATE_RESOLUTION: f64 = 0.01;

pub const DEFAULT_FEED_RATE: f64 = 1000.0;
/// Default S word of the horizontal pass re-engage instruction.
pub const DEFAULT_SPINDLE_POWER: u32 = 1000;

/// Parameters for toolpath emission
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToolpathParameters {
    /// Feed rate, in the program's units per minute
    pub feed_rate: f64,
    /// Unit the coordinates are expressed in
    pub units: MeasurementSystem,
    /// Spindle/laser power used when re-engaging for horizontal cuts
    pub spindle_power: u32,
}

impl Default for ToolpathParameters {
    fn default() -> Self {
        Self {
            feed_rate: DEFAULT_FEED_RATE,
            units: MeasurementSystem::Metric,
            spindle_power: DEFAULT_SPINDLE_POWER,
        }
    }
}

/// An emitted program, kept in its four blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolpathProgram {
    pub header: Vec<String>,
    pub vertical_pass: Vec<String>,
    pub horizontal_pass: Vec<String>,
    pub footer: Vec<String>,
}

impl ToolpathProgram {
    /// All lines in execution order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.header
            .iter()
            .chain(&self.vertical_pass)
            .chain(&self.horizontal_pass)
            .chain(&self.footer)
            .map(String::as_str)
    }

    pub fn line_count(&self) -> usize {
        self.header.len()
            + self.vertical_pass.len()
            + self.horizontal_pass.len()
            + self.footer.len()
    }

    /// Program text, lines joined by `\n` without a trailing newline.
    pub fn to_gcode(&self) -> String {
        self.lines().collect::<Vec<_>>().join("\n")
    }
}

impl fmt::Display for ToolpathProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_gcode())
    }
}

/// Generator turning cut lists into a [`ToolpathProgram`]
pub struct ToolpathGenerator {
    params: ToolpathParameters,
}

impl ToolpathGenerator {
    pub fn new(params: ToolpathParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ToolpathParameters {
        &self.params
    }

    /// Emit the program for the given cuts.
    pub fn generate(&self, vertical: &[CutSegment], horizontal: &[CutSegment]) -> ToolpathProgram {
        let p = &self.params;

        let mut header = vec![PROGRAM_DELIMITER.to_string(), PROGRAM_ID.to_string()];
        header.push(unit_directive(p.units).to_string());
        header.push(format!("F{}", p.feed_rate));
        header.push(SAFE_HEIGHT.to_string());

        let mut vertical_pass = vec![VERTICAL_PASS_LABEL.to_string()];
        for (i, seg) in vertical.iter().enumerate() {
            vertical_pass.push(format!("(Vertical Cut #{})", i + 1));
            vertical_pass.push(rapid_to(seg));
            vertical_pass.push("M3 (Cut On)".to_string());
            vertical_pass.push(cut_to(seg));
            vertical_pass.push("M5 (Cut Off)".to_string());
        }

        let mut horizontal_pass = vec![HORIZONTAL_PASS_LABEL.to_string()];
        for (i, seg) in horizontal.iter().enumerate() {
            horizontal_pass.push(format!("(Horizontal Cut #{})", i + 1));
            horizontal_pass.push(rapid_to(seg));
            horizontal_pass.push(format!("M3 S{}", p.spindle_power));
            horizontal_pass.push(cut_to(seg));
            horizontal_pass.push("M5".to_string());
        }

        let footer = vec![
            TRAVEL_HEIGHT.to_string(),
            RETURN_HOME.to_string(),
            PROGRAM_END.to_string(),
            PROGRAM_DELIMITER.to_string(),
        ];

        ToolpathProgram {
            header,
            vertical_pass,
            horizontal_pass,
            footer,
        }
    }
}

/// Modal unit and positioning directive for the header.
pub fn unit_directive(units: MeasurementSystem) -> &'static str {
    match units {
        MeasurementSystem::Imperial => "G20 G90 (Inch, Absolute)",
        MeasurementSystem::Metric => "G21 G90 (Metric, Absolute)",
    }
}

fn rapid_to(seg: &CutSegment) -> String {
    format!("G0 X{:.2} Y{:.2}", seg.x1, seg.y1)
}

fn cut_to(seg: &CutSegment) -> String {
    format!("G1 X{:.2} Y{:.2}", seg.x2, seg.y2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_program_framing() {
        let program = ToolpathGenerator::new(ToolpathParameters::default()).generate(&[], &[]);
        assert_eq!(
            program.to_gcode(),
            "%\nO1000 (NESTING CUT)\nG21 G90 (Metric, Absolute)\nF1000\nG0 Z0.5 (Safe Height)\n\
             (--- 1st Pass: VERTICAL ---)\n(--- 2nd Pass: HORIZONTAL ---)\n\
             G0 Z10.0\nG0 X0 Y0\nM30 (End of Program)\n%"
        );
        assert_eq!(program.line_count(), 11);
    }

    #[test]
    fn test_inch_directive() {
        let params = ToolpathParameters {
            units: MeasurementSystem::Imperial,
            ..Default::default()
        };
        let program = ToolpathGenerator::new(params).generate(&[], &[]);
        assert_eq!(program.header[2], "G20 G90 (Inch, Absolute)");
    }

    #[test]
    fn test_cut_blocks() {
        let params = ToolpathParameters {
            feed_rate: 1500.5,
            spindle_power: 800,
            ..Default::default()
        };
        let program = ToolpathGenerator::new(params).generate(
            &[CutSegment::vertical(40.0, 0.0, 48.0)],
            &[CutSegment::horizontal(28.0, 0.0, 40.0)],
        );
        assert_eq!(program.header[3], "F1500.5");
        assert_eq!(
            program.vertical_pass,
            vec![
                "(--- 1st Pass: VERTICAL ---)",
                "(Vertical Cut #1)",
                "G0 X40.00 Y0.00",
                "M3 (Cut On)",
                "G1 X40.00 Y48.00",
                "M5 (Cut Off)",
            ]
        );
        assert_eq!(
            program.horizontal_pass,
            vec![
                "(--- 2nd Pass: HORIZONTAL ---)",
                "(Horizontal Cut #1)",
                "G0 X0.00 Y28.00",
                "M3 S800",
                "G1 X40.00 Y28.00",
                "M5",
            ]
        );
    }

    #[test]
    fn test_two_decimal_rounding() {
        let program = ToolpathGenerator::new(ToolpathParameters::default())
            .generate(&[CutSegment::vertical(12.3456, 0.0, 7.891)], &[]);
        assert_eq!(program.vertical_pass[2], "G0 X12.35 Y0.00");
        assert_eq!(program.vertical_pass[4], "G1 X12.35 Y7.89");
    }

    #[test]
    fn test_display_matches_gcode() {
        let program = ToolpathGenerator::new(ToolpathParameters::default())
            .generate(&[], &[CutSegment::horizontal(1.0, 0.0, 2.0)]);
        assert_eq!(program.to_string(), program.to_gcode());
        assert!(!program.to_gcode().ends_with('\n'));
    }
}
