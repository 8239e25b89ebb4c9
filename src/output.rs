//! Terminal output for the gridmap CLI.
//!
//! Cargo-style status lines with a right-aligned verb column. Status output
//! goes to stderr; stdout carries only machine-readable output such as
//! `gridmap tiles --json`.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

use crate::validation::{Diagnostic, Severity, ValidationResult};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

const VERB_WIDTH: usize = 12;

/// Status printer for stderr.
///
/// Colour is on when stderr is a terminal. Verbose lines (`detail`) only
/// print when verbose mode is enabled.
pub struct Printer {
    color: bool,
    verbose: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
            verbose: false,
        }
    }

    /// Toggle per-step detail lines.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// e.g. "    Painting coastal_route (25x56)"
    pub fn status(&self, verb: &str, message: &str) {
        self.print_line(GREEN, verb, message);
    }

    pub fn info(&self, verb: &str, message: &str) {
        self.print_line(CYAN, verb, message);
    }

    pub fn warning(&self, verb: &str, message: &str) {
        self.print_line(YELLOW, verb, message);
    }

    pub fn error(&self, verb: &str, message: &str) {
        self.print_line(RED, verb, message);
    }

    /// Dim line shown only in verbose mode.
    pub fn detail(&self, verb: &str, message: &str) {
        if self.verbose {
            self.print_line(DIM, verb, message);
        }
    }

    pub fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    pub fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    /// Paths and other pointers.
    pub fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }

    /// Coloured severity label.
    pub fn severity(&self, severity: Severity) -> String {
        let label = severity.to_string();
        match severity {
            Severity::Error if self.color => format!("{BOLD}{RED}{label}{RESET}"),
            Severity::Warning if self.color => format!("{BOLD}{YELLOW}{label}{RESET}"),
            _ => label,
        }
    }

    /// Print one validation diagnostic with its help line.
    pub fn diagnostic(&self, d: &Diagnostic) {
        let mut stderr = io::stderr().lock();
        let subject = d
            .map_id
            .as_deref()
            .map(|id| format!("{}: ", self.bold(id)))
            .unwrap_or_default();
        let _ = writeln!(
            stderr,
            "{}[{}]: {}{}",
            self.severity(d.severity),
            d.code,
            subject,
            d.message
        );
        if let Some(help) = &d.help {
            let _ = writeln!(stderr, "  {} {}", self.dim("help:"), help);
        }
    }

    /// Print every diagnostic, then a summary line.
    pub fn diagnostics(&self, result: &ValidationResult) {
        for d in result.iter() {
            self.diagnostic(d);
        }

        let errors = result.error_count();
        let warnings = result.warning_count();

        if errors > 0 {
            self.error(
                "Failed",
                &format!(
                    "validation: {}, {}",
                    plural(errors, "error", "errors"),
                    plural(warnings, "warning", "warnings")
                ),
            );
        } else if warnings > 0 {
            self.warning(
                "Passed",
                &format!("validation ({})", plural(warnings, "warning", "warnings")),
            );
        } else {
            self.status("Passed", "validation");
        }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn print_line(&self, color: &str, verb: &str, message: &str) {
        let mut stderr = io::stderr().lock();
        if self.color {
            let _ = writeln!(stderr, "{BOLD}{color}{verb:>VERB_WIDTH$}{RESET} {message}");
        } else {
            let _ = writeln!(stderr, "{verb:>VERB_WIDTH$} {message}");
        }
    }
}

/// Pluralize a count: `plural(1, "map", "maps")` gives "1 map".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, pluralized)
    }
}

/// Relative display path when under the working directory.
pub fn display_path(path: &Path) -> String {
    if let Ok(cwd) = std::env::current_dir() {
        if let Ok(relative) = path.strip_prefix(&cwd) {
            let s = relative.display().to_string();
            if s.is_empty() {
                return ".".to_string();
            }
            return s;
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "map", "maps"), "1 map");
        assert_eq!(plural(0, "map", "maps"), "0 maps");
        assert_eq!(plural(12, "entity", "entities"), "12 entities");
    }

    #[test]
    fn test_display_path_outside_cwd() {
        let p = Path::new("/nonexistent/dist/route_1.map.json");
        assert_eq!(display_path(p), "/nonexistent/dist/route_1.map.json");
    }

    #[test]
    fn test_plain_styling_without_color() {
        let printer = Printer {
            color: false,
            verbose: false,
        };
        assert_eq!(printer.bold("town"), "town");
        assert_eq!(printer.severity(Severity::Error), "error");
        assert!(!printer.is_verbose());
        assert!(printer.verbose(true).is_verbose());
    }
}
