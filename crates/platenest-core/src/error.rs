//! Error handling for platenest
//!
//! Geometry errors shared by every layer of the engine: plate validation
//! and segment orientation. Higher crates wrap them with `#[from]`.

use thiserror::Error;

/// Geometry error type
///
/// Raised when caller-supplied geometry cannot describe a cuttable plate
/// or an orthogonal cut.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Plate dimensions are zero, negative or not finite
    #[error("Invalid plate dimensions: {width} x {height}")]
    InvalidPlate {
        /// The rejected horizontal extent.
        width: f64,
        /// The rejected vertical extent.
        height: f64,
    },

    /// Segment is neither vertical nor horizontal
    #[error("Segment ({x1}, {y1}) -> ({x2}, {y2}) is not axis aligned")]
    NotAxisAligned {
        /// Start X.
        x1: f64,
        /// Start Y.
        y1: f64,
        /// End X.
        x2: f64,
        /// End Y.
        y2: f64,
    },
}
