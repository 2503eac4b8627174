//! Safety checks run on an emitted program before it is written anywhere.

use crate::error::{CamToolError, CamToolResult};
use crate::toolpath_program::{
    ToolpathProgram, COORDINATE_RESOLUTION, HORIZONTAL_PASS_LABEL, PROGRAM_DELIMITER, PROGRAM_END,
    VERTICAL_PASS_LABEL,
};
use platenest_core::{CutSegment, Orientation, Plate};
use regex::Regex;
use std::sync::LazyLock;

static MOVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^G([01]) X(-?\d+\.\d+) Y(-?\d+\.\d+)$").expect("move pattern is valid")
});

/// Validates toolpath programs against the plate they were generated for.
#[derive(Debug, Clone)]
pub struct ProgramValidator {
    plate: Plate,
    tolerance: f64,
}

impl ProgramValidator {
    /// Coordinates are read back after rounding, so the plate edge is
    /// widened by half a printed digit.
    pub fn new(plate: Plate) -> Self {
        Self {
            plate,
            tolerance: COORDINATE_RESOLUTION / 2.0 + 1e-6,
        }
    }

    /// Check framing, coordinate bounds and cut orientation.
    pub fn validate(&self, program: &ToolpathProgram) -> CamToolResult<()> {
        self.validate_framing(program)?;
        self.validate_pass(&program.vertical_pass, Orientation::Vertical)?;
        self.validate_pass(&program.horizontal_pass, Orientation::Horizontal)?;
        Ok(())
    }

    fn validate_framing(&self, program: &ToolpathProgram) -> CamToolResult<()> {
        let count = |needle: &str| program.lines().filter(|l| *l == needle).count();

        if program.header.first().map(String::as_str) != Some(PROGRAM_DELIMITER)
            || program.footer.last().map(String::as_str) != Some(PROGRAM_DELIMITER)
            || count(PROGRAM_DELIMITER) != 2
        {
            return Err(fail("program must open and close with a single delimiter each"));
        }
        if program.vertical_pass.first().map(String::as_str) != Some(VERTICAL_PASS_LABEL)
            || count(VERTICAL_PASS_LABEL) != 1
        {
            return Err(fail("missing or repeated vertical pass label"));
        }
        if program.horizontal_pass.first().map(String::as_str) != Some(HORIZONTAL_PASS_LABEL)
            || count(HORIZONTAL_PASS_LABEL) != 1
        {
            return Err(fail("missing or repeated horizontal pass label"));
        }
        if count(PROGRAM_END) != 1 {
            return Err(fail("program end marker must appear exactly once"));
        }
        Ok(())
    }

    fn validate_pass(&self, lines: &[String], orientation: Orientation) -> CamToolResult<()> {
        let mut start: Option<(f64, f64)> = None;
        for line in lines {
            let Some(caps) = MOVE_RE.captures(line) else {
                if line.starts_with("G0") || line.starts_with("G1") {
                    return Err(fail(format!("unparseable move '{}'", line)));
                }
                continue;
            };
            let x: f64 = caps[2]
                .parse()
                .map_err(|_| fail(format!("bad X in '{}'", line)))?;
            let y: f64 = caps[3]
                .parse()
                .map_err(|_| fail(format!("bad Y in '{}'", line)))?;
            self.check_bounds(x, y, line)?;

            if &caps[1] == "0" {
                start = Some((x, y));
            } else {
                let (x1, y1) =
                    start.take().ok_or_else(|| fail(format!("cut without rapid '{}'", line)))?;
                let seg = CutSegment::new(x1, y1, x, y);
                if seg.length() > 0.0 && seg.require_orientation()? != orientation {
                    return Err(fail(format!("{} pass contains cut {}", orientation, seg)));
                }
            }
        }
        Ok(())
    }

    fn check_bounds(&self, x: f64, y: f64, line: &str) -> CamToolResult<()> {
        let t = self.tolerance;
        if x < -t || y < -t || x > self.plate.width + t || y > self.plate.height + t {
            return Err(fail(format!(
                "'{}' lies outside plate {}",
                line, self.plate
            )));
        }
        Ok(())
    }
}

fn fail(msg: impl Into<String>) -> CamToolError {
    CamToolError::ValidationFailed(msg.into())
}
