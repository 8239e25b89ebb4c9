//! Build command implementation.
//!
//! Paints every discovered map script and writes one `.map.json` document
//! per map. Maps are independent: a failing map is reported and skipped,
//! and the command fails at the end if any map failed.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use clap::Args;
use miette::Diagnostic as _;

use crate::discovery::{discover, discover_paths};
use crate::error::{MapError, Result};
use crate::output::{display_path, plural, Printer};
use crate::parser::load_map_script;
use crate::registry::TileRegistry;
use crate::render::{document_path, write_document, MapPainter};
use crate::validation::{validate_document, ValidationResult};

/// Paint map scripts and write map documents
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Map scripts or directories (default: the project in the current directory)
    pub files: Vec<PathBuf>,

    /// Output directory (overrides gridmap.yaml)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Tile size for scripts that don't set one (overrides gridmap.yaml)
    #[arg(long)]
    pub tile_size: Option<u32>,

    /// Custom tile registry file (overrides gridmap.yaml)
    #[arg(long)]
    pub registry: Option<PathBuf>,

    /// Run advisory checks on each map and print warnings
    #[arg(long)]
    pub validate: bool,
}

/// Settings for one build run.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub output: PathBuf,
    pub tile_size: u32,
    pub validate: bool,
}

/// What a build run produced.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Written documents, in script order.
    pub written: Vec<PathBuf>,

    /// Scripts that failed, with their error.
    pub failures: Vec<(PathBuf, MapError)>,

    /// Advisory diagnostics collected with `--validate`.
    pub diagnostics: ValidationResult,
}

impl BuildReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

pub fn run(args: BuildArgs, printer: &Printer) -> Result<()> {
    let discovery = if args.files.is_empty() {
        discover(".")?
    } else {
        discover_paths(&args.files)?
    };

    let registry = match &args.registry {
        Some(path) => TileRegistry::load(path)?,
        None => discovery.registry()?,
    };

    let options = BuildOptions {
        output: args.output.unwrap_or_else(|| discovery.output_dir()),
        tile_size: args
            .tile_size
            .unwrap_or_else(|| discovery.manifest.effective_tile_size()),
        validate: args.validate,
    };

    let scripts = &discovery.scan.scripts;
    if scripts.is_empty() {
        printer.warning("Skipped", "no map scripts found");
        return Ok(());
    }

    printer.info(
        "Registry",
        &format!(
            "{} {} ({})",
            registry.id(),
            registry.version(),
            plural(registry.len(), "tile", "tiles")
        ),
    );

    let report = build_maps(scripts, &registry, &options, printer);

    if options.validate {
        printer.diagnostics(&report.diagnostics);
    }

    if !report.is_success() {
        return Err(MapError::Build {
            message: format!(
                "{} of {} failed",
                report.failures.len(),
                plural(scripts.len(), "map", "maps")
            ),
            help: Some("Fix the errors above; the other maps were written".to_string()),
        });
    }

    printer.status(
        "Finished",
        &format!(
            "{} to {}",
            plural(report.written.len(), "map", "maps"),
            printer.cyan(&display_path(&options.output))
        ),
    );

    Ok(())
}

/// Build each script independently and collect the outcome.
pub fn build_maps(
    scripts: &[PathBuf],
    registry: &TileRegistry,
    options: &BuildOptions,
    printer: &Printer,
) -> BuildReport {
    let painter = MapPainter::new(registry).with_tile_size(options.tile_size);
    let mut report = BuildReport::default();
    let mut seen: HashMap<String, PathBuf> = HashMap::new();

    for script_path in scripts {
        match build_one(script_path, &painter, options, &mut seen, printer) {
            Ok((output, diagnostics)) => {
                report.written.push(output);
                report.diagnostics.merge(diagnostics);
            }
            Err(err) => {
                printer.error(
                    "Failed",
                    &format!("{}: {}", display_path(script_path), err),
                );
                if let Some(help) = err.help() {
                    printer.detail("help", &help.to_string());
                }
                report.failures.push((script_path.clone(), err));
            }
        }
    }

    report
}

fn build_one(
    script_path: &Path,
    painter: &MapPainter,
    options: &BuildOptions,
    seen: &mut HashMap<String, PathBuf>,
    printer: &Printer,
) -> Result<(PathBuf, ValidationResult)> {
    let script = load_map_script(script_path)?;

    if let Some(first) = seen.get(&script.id) {
        return Err(MapError::Build {
            message: format!(
                "map id '{}' is already built from {}",
                script.id,
                display_path(first)
            ),
            help: Some("Each map id names one output file".to_string()),
        });
    }

    printer.status(
        "Painting",
        &format!("{} ({}x{})", script.id, script.width, script.height),
    );
    printer.detail(
        "Replaying",
        &plural(script.draw.len(), "instruction", "instructions"),
    );

    let document = painter.paint(&script)?;

    let diagnostics = if options.validate {
        validate_document(&document, painter.registry())
    } else {
        ValidationResult::new()
    };

    let output = document_path(&options.output, &document.map_id);
    write_document(&document, &output)?;
    seen.insert(script.id.clone(), script_path.to_path_buf());
    printer.detail(
        "Wrote",
        &format!(
            "{} ({})",
            display_path(&output),
            plural(document.entity_count(), "entity", "entities")
        ),
    );

    Ok((output, diagnostics))
}
