//! platenest CLI
//!
//! Usage:
//!   platenest parts.toml --width 96 --height 48
//!   platenest order.txt --width 2440 --height 1220 --output job.nc --debug
//!   platenest scan.lines.json --width 2440 --height 1220 --unit inch

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use platenest::pipeline::{
    plan_from_document, plan_from_lines, plan_nesting, write_outputs, CatalogFile,
};
use platenest::{init_logging, BUILD_DATE, VERSION};
use platenest_camtools::{JsonLineDetector, LineDetector, TextTableExtractor};
use platenest_core::{MeasurementSystem, Plate};
use platenest_settings::Config;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};

/// Nest rectangular parts on a plate and write the cutting program
#[derive(Parser, Debug)]
#[command(name = "platenest")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Part list, document text or detected-lines dump
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Plate width (horizontal extent)
    #[arg(long)]
    width: f64,

    /// Plate height (vertical extent)
    #[arg(long)]
    height: f64,

    /// Output program file [default: from config, output.nc]
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Also write an SVG preview next to the program
    #[arg(long)]
    debug: bool,

    /// Input kind, inferred from the file name when omitted
    #[arg(long, value_enum)]
    source: Option<SourceKind>,

    /// Dimension unit; "inch" selects imperial, anything else metric
    #[arg(long, value_name = "UNIT")]
    unit: Option<String>,

    /// Feed rate written to the program
    #[arg(long)]
    feed_rate: Option<f64>,

    /// Extend the last column's horizontal cuts to the plate edge
    #[arg(long)]
    extend_remnant: bool,

    /// Configuration file (TOML or JSON)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SourceKind {
    /// Text layer of an order document
    Document,
    /// TOML or JSON part list
    Catalog,
    /// JSON dump of detected lines
    Lines,
}

impl SourceKind {
    fn infer(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_ascii_lowercase();
        if name.ends_with(".lines.json") {
            return Some(Self::Lines);
        }
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "txt" => Some(Self::Document),
            "toml" | "json" => Some(Self::Catalog),
            _ => None,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(cli.verbose) {
        eprintln!("Error: {:#}", err);
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::load_or_default().context("Failed to load default config")?,
    };

    if let Some(unit) = &cli.unit {
        config.toolpath.units = MeasurementSystem::from_label(unit);
    }
    if let Some(feed_rate) = cli.feed_rate {
        config.toolpath.feed_rate = feed_rate;
    }
    if cli.extend_remnant {
        config.nesting.extend_remnant = true;
    }
    if cli.debug {
        config.output.debug_preview = true;
    }
    if let Some(output) = &cli.output {
        config.output.default_output = output.clone();
    }

    config.validate().context("Invalid settings")?;
    Ok(config)
}

fn run(cli: Cli) -> Result<()> {
    debug!(version = VERSION, build_date = BUILD_DATE, "platenest starting");

    let config = load_config(&cli)?;
    let plate = Plate::new(cli.width, cli.height).context("Invalid plate")?;
    let source = match cli.source {
        Some(source) => source,
        None => SourceKind::infer(&cli.input).with_context(|| {
            format!(
                "Cannot tell the input kind of {}, pass --source",
                cli.input.display()
            )
        })?,
    };

    info!(input = %cli.input.display(), ?source, %plate, "Processing");

    let output = config.output.default_output.as_path();
    let debug_preview = config.output.debug_preview;
    let written = match source {
        SourceKind::Catalog => {
            let catalog = CatalogFile::load(&cli.input)?;
            let run = plan_nesting(plate, &catalog.parts, &config);
            write_outputs(&run, output, debug_preview)?
        }
        SourceKind::Document => {
            let text = read_input(&cli.input)?;
            let extractor = TextTableExtractor::new(&config.extraction.row_marker)
                .context("Invalid row marker")?;
            let run = plan_from_document(&extractor, text.as_str(), Some(plate), &config)?;
            write_outputs(&run, output, debug_preview)?
        }
        SourceKind::Lines => {
            let dump = read_input(&cli.input)?;
            let detector = JsonLineDetector::new(config.extraction.merge_tolerance_px);
            let detected = detector
                .detect(dump.as_str())
                .context("Failed to read detected lines")?;
            let run = plan_from_lines(&detected, plate, &config)?;
            write_outputs(&run, output, debug_preview)?
        }
    };

    info!(program = %written.program.display(), "Done");
    if let Some(preview) = written.preview {
        info!(preview = %preview.display(), "Debug preview saved");
    }
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_infer_source() {
        assert_eq!(
            SourceKind::infer(Path::new("scan.lines.json")),
            Some(SourceKind::Lines)
        );
        assert_eq!(
            SourceKind::infer(Path::new("parts.json")),
            Some(SourceKind::Catalog)
        );
        assert_eq!(
            SourceKind::infer(Path::new("parts.TOML")),
            Some(SourceKind::Catalog)
        );
        assert_eq!(
            SourceKind::infer(Path::new("order.txt")),
            Some(SourceKind::Document)
        );
        assert_eq!(SourceKind::infer(Path::new("drawing.pdf")), None);
        assert_eq!(SourceKind::infer(Path::new("noext")), None);
    }

    #[test]
    fn test_parse_args() {
        let cli = Cli::try_parse_from([
            "platenest",
            "parts.toml",
            "--width",
            "96",
            "--height",
            "48",
            "--unit",
            "inch",
            "--extend-remnant",
        ])
        .unwrap();
        assert_eq!(cli.width, 96.0);
        assert_eq!(cli.unit.as_deref(), Some("inch"));
        assert!(cli.extend_remnant);
        assert!(cli.output.is_none());

        assert!(Cli::try_parse_from(["platenest", "parts.toml", "--width", "96"]).is_err());
    }
}
