//! Measurement system selection
//!
//! The engine never converts coordinates: callers pick one system and
//! supply every dimension in it. The selection only decides which unit
//! directive the toolpath program declares.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Measurement system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementSystem {
    /// Metric system (mm)
    #[default]
    Metric,
    /// Imperial system (inches)
    Imperial,
}

impl MeasurementSystem {
    /// Resolve a free-form unit label.
    ///
    /// Only `"inch"` (any case, surrounding whitespace ignored) selects
    /// imperial; every other label, including unknown ones, falls back to
    /// metric.
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("inch") {
            Self::Imperial
        } else {
            Self::Metric
        }
    }

    /// Short unit label ("mm" or "in")
    pub fn label(&self) -> &'static str {
        match self {
            Self::Metric => "mm",
            Self::Imperial => "in",
        }
    }
}

impl fmt::Display for MeasurementSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metric => write!(f, "Metric"),
            Self::Imperial => write!(f, "Imperial"),
        }
    }
}
