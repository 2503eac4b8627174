//! # platenest CAM Tools
//!
//! The nesting and toolpath engine: rectangular parts go in, a framed
//! cutting program comes out.
//!
//! ## Stages
//!
//! - **Layout Packer**: expands the catalog and packs items into columns
//! - **Cut Plan**: collects the cuts and optionally extends remnant cuts
//! - **Toolpath Program**: emits the vertical and horizontal passes
//!
//! ## Supporting Infrastructure
//!
//! - **Validator**: framing and bounds checks before anything is written
//! - **Preview**: SVG rendering of a layout for debugging
//! - **Extraction**: contracts for document and line-detection collaborators

pub mod cut_plan;
pub mod error;
pub mod extraction;
pub mod layout_packer;
pub mod preview;
pub mod toolpath_program;
pub mod validator;

// Re-export commonly used items
pub use cut_plan::{extend_remnant, CutPlan, REMNANT_TOLERANCE};
pub use error::{CamToolError, CamToolResult, ExtractionError, ParameterError};
pub use extraction::{
    plate_from_extraction, DetectedLines, DocumentExtraction, DocumentExtractor,
    JsonLineDetector, LineDetector, PixelLine, PixelMapping, PlateDimensions, TextTableExtractor,
};
pub use layout_packer::{expand_catalog, CatalogExpansion, LayoutPacker, LayoutStatus, NestingLayout};
pub use preview::render_svg_preview;
pub use toolpath_program::{ToolpathGenerator, ToolpathParameters, ToolpathProgram};
pub use validator::ProgramValidator;
