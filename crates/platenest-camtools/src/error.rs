//! Error types for the CAM tools crate.
//!
//! This module provides structured error types for nesting, toolpath
//! emission, parameter validation and document/line extraction.

use thiserror::Error;

/// Errors that can occur during CAM tool operations.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// Invalid geometry was provided (plate or segment).
    #[error(transparent)]
    Geometry(#[from] platenest_core::GeometryError),

    /// A generated program failed validation.
    #[error("Program validation failed: {0}")]
    ValidationFailed(String),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// A parameter validation error occurred.
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),

    /// An extraction collaborator returned unusable data.
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),
}

/// Errors related to CAM tool parameter validation.
#[derive(Error, Debug)]
pub enum ParameterError {
    /// Dimensions are invalid (zero or negative).
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
}

/// Errors related to the results handed over by extraction collaborators.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The document did not declare both plate dimensions.
    #[error("Plate dimensions not found in document")]
    MissingPlateDimensions,

    /// The document contained no recognizable part rows.
    #[error("No part rows found in document")]
    EmptyCatalog,

    /// A pattern could not be compiled.
    #[error("Invalid extraction pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Result type alias for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;
