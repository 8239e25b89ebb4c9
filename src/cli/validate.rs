//! Validate command implementation.
//!
//! Reads built `.map.json` documents and runs the shape check plus the
//! advisory checks. Unreadable documents are reported as errors without
//! stopping the others.

use std::path::PathBuf;

use clap::Args;

use crate::discovery::{discover, discover_paths, scan_directory, Manifest};
use crate::error::{MapError, Result};
use crate::output::{display_path, plural, Printer};
use crate::registry::TileRegistry;
use crate::render::read_document;
use crate::types::MapDocument;
use crate::validation::{validate_documents, Diagnostic, ValidationResult};

/// Check built map documents
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Documents or directories (default: the project's output directory)
    pub files: Vec<PathBuf>,

    /// Custom tile registry file (overrides gridmap.yaml)
    #[arg(long)]
    pub registry: Option<PathBuf>,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

pub fn run(args: ValidateArgs, printer: &Printer) -> Result<()> {
    let (paths, project_registry) = if args.files.is_empty() {
        let project = discover(".")?;
        let output = project.output_dir();
        let scan = scan_directory(&output, &Manifest::default());
        (scan.documents, Some(project.registry()?))
    } else {
        (discover_paths(&args.files)?.scan.documents, None)
    };

    let registry = match (&args.registry, project_registry) {
        (Some(path), _) => TileRegistry::load(path)?,
        (None, Some(registry)) => registry,
        (None, None) => TileRegistry::builtin(),
    };

    if paths.is_empty() {
        printer.warning("Skipped", "no map documents found");
        return Ok(());
    }

    printer.status(
        "Checking",
        &plural(paths.len(), "document", "documents"),
    );

    let (documents, mut result) = read_all(&paths, printer);
    result.merge(validate_documents(&documents, &registry));

    printer.diagnostics(&result);

    let failed = result.has_errors() || (args.strict && result.has_warnings());
    if failed {
        return Err(MapError::Validation {
            message: format!(
                "{}, {}",
                plural(result.error_count(), "error", "errors"),
                plural(result.warning_count(), "warning", "warnings")
            ),
            help: if args.strict && !result.has_errors() {
                Some("--strict treats warnings as errors".to_string())
            } else {
                None
            },
        });
    }

    Ok(())
}

/// Read every document, turning read failures into error diagnostics.
fn read_all(paths: &[PathBuf], printer: &Printer) -> (Vec<MapDocument>, ValidationResult) {
    let mut documents = Vec::new();
    let mut result = ValidationResult::new();

    for path in paths {
        match read_document(path) {
            Ok(doc) => {
                printer.detail("Read", &display_path(path));
                documents.push(doc);
            }
            Err(err) => result.push(Diagnostic::error(
                "gridmap::validate::unreadable",
                format!("{}: {}", display_path(path), err),
            )),
        }
    }

    (documents, result)
}
