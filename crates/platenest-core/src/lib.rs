//! # platenest Core
//!
//! Core value types shared by every platenest crate: the plate being cut,
//! the part catalog, placed rectangles and orthogonal cut segments, plus
//! the measurement system and the geometry error type.

pub mod error;
pub mod geometry;
pub mod units;

pub use error::GeometryError;
pub use geometry::{CutSegment, Item, Orientation, PartSpec, PlacedRect, Plate, MAX_QUANTITY};
pub use units::MeasurementSystem;
