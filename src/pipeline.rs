//! Job pipeline
//!
//! Wires the packer, cut plan and toolpath generator together for each
//! input path and writes the results. Every program is validated against
//! its plate before it touches the filesystem.

use anyhow::{bail, Context};
use platenest_camtools::{
    plate_from_extraction, render_svg_preview, CamToolError, CutPlan, DetectedLines,
    DocumentExtractor, ExtractionError, LayoutPacker, LayoutStatus, NestingLayout, PixelMapping,
    ProgramValidator, ToolpathGenerator, ToolpathParameters, ToolpathProgram,
};
use platenest_core::{CutSegment, PartSpec, Plate};
use platenest_settings::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Program parameters taken from the toolpath section of a config.
pub fn toolpath_parameters(config: &Config) -> ToolpathParameters {
    ToolpathParameters {
        feed_rate: config.toolpath.feed_rate,
        units: config.toolpath.units,
        spindle_power: config.toolpath.spindle_power,
    }
}

/// Part list file for the catalog input path.
///
/// ```toml
/// [[parts]]
/// length = 40.0
/// width = 20.0
/// quantity = 2
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub parts: Vec<PartSpec>,
}

impl CatalogFile {
    /// Load a catalog from a `.toml` or `.json` file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog {}", path.display()))?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let catalog = match extension.as_deref() {
            Some("toml") => toml::from_str(&content)
                .with_context(|| format!("Invalid catalog {}", path.display()))?,
            Some("json") => serde_json::from_str(&content)
                .with_context(|| format!("Invalid catalog {}", path.display()))?,
            other => bail!(
                "Unsupported catalog format: {}",
                other.unwrap_or("<none>")
            ),
        };
        Ok(catalog)
    }
}

/// Output of a run that went through the packer.
#[derive(Debug, Clone)]
pub struct NestingRun {
    pub layout: NestingLayout,
    pub cuts: CutPlan,
    pub program: ToolpathProgram,
}

/// Output of a run that cut pre-detected lines without packing.
#[derive(Debug, Clone)]
pub struct LineRun {
    pub plate: Plate,
    pub cuts: CutPlan,
    pub program: ToolpathProgram,
}

/// What [`write_outputs`] needs from a finished run.
pub trait PlannedRun {
    fn plate(&self) -> Plate;
    fn program(&self) -> &ToolpathProgram;
    fn preview_svg(&self) -> String;
}

impl PlannedRun for NestingRun {
    fn plate(&self) -> Plate {
        self.layout.plate
    }

    fn program(&self) -> &ToolpathProgram {
        &self.program
    }

    fn preview_svg(&self) -> String {
        render_svg_preview(
            &self.layout.plate,
            &self.layout.placed,
            &self.cuts.vertical,
            &self.cuts.horizontal,
        )
    }
}

impl PlannedRun for LineRun {
    fn plate(&self) -> Plate {
        self.plate
    }

    fn program(&self) -> &ToolpathProgram {
        &self.program
    }

    fn preview_svg(&self) -> String {
        render_svg_preview(&self.plate, &[], &self.cuts.vertical, &self.cuts.horizontal)
    }
}

/// Pack a catalog onto a plate and build its cutting program.
///
/// Running out of room is not an error; check `layout.status()`.
pub fn plan_nesting(plate: Plate, catalog: &[PartSpec], config: &Config) -> NestingRun {
    let layout = LayoutPacker::new(plate).pack(catalog);

    if layout.status() == LayoutStatus::NoValidItems {
        warn!(
            rejected_entries = layout.rejected_entries,
            "Catalog contains no valid parts"
        );
    }

    let cuts = CutPlan::from_layout(&layout, config.nesting.extend_remnant);
    let program = ToolpathGenerator::new(toolpath_parameters(config))
        .generate(&cuts.vertical, &cuts.horizontal);

    info!(
        placed = layout.placed.len(),
        cuts = cuts.len(),
        units = config.toolpath.units.label(),
        utilization = %format!("{:.1}%", layout.utilization() * 100.0),
        "Nesting planned"
    );
    NestingRun {
        layout,
        cuts,
        program,
    }
}

/// Extract a catalog and plate from a document, then pack it.
///
/// The document must declare its plate dimensions and at least one part
/// row. When `requested` is given it takes precedence, and a mismatch with
/// the document is logged.
pub fn plan_from_document<E>(
    extractor: &E,
    document: &E::Document,
    requested: Option<Plate>,
    config: &Config,
) -> anyhow::Result<NestingRun>
where
    E: DocumentExtractor,
{
    let extraction = extractor
        .extract(document)
        .context("Failed to extract the part table")?;

    let document_plate = plate_from_extraction(extraction.plate)
        .context("Document does not declare plate dimensions")?;
    if extraction.catalog.is_empty() {
        return Err(CamToolError::from(ExtractionError::EmptyCatalog))
            .context("Document has no part table");
    }
    debug!(plate = %document_plate, entries = extraction.catalog.len(), "Extracted document");

    let plate = match requested {
        Some(plate) if plate != document_plate => {
            warn!(
                document = %document_plate,
                requested = %plate,
                "Document plate differs from the requested plate, using the requested one"
            );
            plate
        }
        Some(plate) => plate,
        None => document_plate,
    };
    Ok(plan_nesting(plate, &extraction.catalog, config))
}

/// Map detected lines onto the plate and cut them without packing.
pub fn plan_from_lines(
    detected: &DetectedLines,
    plate: Plate,
    config: &Config,
) -> anyhow::Result<LineRun> {
    let mapping = PixelMapping::for_detection(detected, &plate)
        .context("Cannot map detected lines onto the plate")?;

    let vertical: Vec<CutSegment> = mapping.map_lines(&detected.vertical);
    let horizontal: Vec<CutSegment> = mapping.map_lines(&detected.horizontal);
    let cuts = CutPlan::new(vertical, horizontal);

    let program = ToolpathGenerator::new(toolpath_parameters(config))
        .generate(&cuts.vertical, &cuts.horizontal);

    info!(
        vertical = cuts.vertical.len(),
        horizontal = cuts.horizontal.len(),
        "Line cuts planned"
    );
    Ok(LineRun {
        plate,
        cuts,
        program,
    })
}

/// Files produced by [`write_outputs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenOutputs {
    pub program: PathBuf,
    pub preview: Option<PathBuf>,
}

/// `<dir>/<stem>_debug.svg` next to the program file.
pub fn preview_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    output.with_file_name(format!("{}_debug.svg", stem))
}

/// Validate the program, then write it and optionally the SVG preview.
pub fn write_outputs<R: PlannedRun>(
    run: &R,
    output: &Path,
    debug_preview: bool,
) -> anyhow::Result<WrittenOutputs> {
    ProgramValidator::new(run.plate())
        .validate(run.program())
        .context("Generated program failed validation")?;

    std::fs::write(output, run.program().to_gcode())
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!(path = %output.display(), lines = run.program().line_count(), "Program written");

    let preview = if debug_preview {
        let path = preview_path(output);
        std::fs::write(&path, run.preview_svg())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), "Preview written");
        Some(path)
    } else {
        None
    };

    Ok(WrittenOutputs {
        program: output.to_path_buf(),
        preview,
    })
}
