use miette::Diagnostic;
use thiserror::Error;

/// Main error type for gridmap operations
#[derive(Error, Diagnostic, Debug)]
pub enum MapError {
    #[error("IO error: {0}")]
    #[diagnostic(code(gridmap::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(gridmap::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(gridmap::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Shape mismatch in map '{map_id}': declared {width}x{height}, {}", .problems.join("; "))]
    #[diagnostic(
        code(gridmap::shape_mismatch),
        help("Allocate both layers with the declared width and height")
    )]
    ShapeMismatch {
        map_id: String,
        width: usize,
        height: usize,
        /// Every disagreement found, one entry per layer row count or row length.
        problems: Vec<String>,
    },

    #[error("Validation error: {message}")]
    #[diagnostic(code(gridmap::validate))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Build error: {message}")]
    #[diagnostic(code(gridmap::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, MapError>;
