//! # platenest
//!
//! Nests rectangular parts onto a plate with a greedy column packer and
//! emits the cutting program that separates them.
//!
//! ## Architecture
//!
//! platenest is organized as a workspace with multiple crates:
//!
//! 1. **platenest-core** - Plate, part and cut geometry, units, errors
//! 2. **platenest-camtools** - Layout packer, cut plan, toolpath program, extraction
//! 3. **platenest-settings** - Job configuration files
//! 4. **platenest** - Job pipeline and the command line binary
//!
//! ## Input paths
//!
//! - **Catalog**: a part list and plate size go through the packer
//! - **Document**: a document's text layer is turned into a catalog first
//! - **Lines**: pre-detected lines are mapped onto the plate and cut as-is

pub mod pipeline;

pub use pipeline::{
    plan_from_document, plan_from_lines, plan_nesting, preview_path, toolpath_parameters,
    write_outputs, CatalogFile, LineRun, NestingRun, PlannedRun, WrittenOutputs,
};

pub use platenest_camtools::{
    CutPlan, LayoutStatus, NestingLayout, ToolpathGenerator, ToolpathParameters, ToolpathProgram,
};
pub use platenest_core::{CutSegment, MeasurementSystem, PartSpec, PlacedRect, Plate};
pub use platenest_settings::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - Console output on stderr, so stdout stays free for results
/// - RUST_LOG environment variable support
/// - INFO by default, DEBUG when `verbose` is set
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let env_filter = EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(verbose);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
