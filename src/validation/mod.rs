//! Validation for map documents.
//!
//! Runs a suite of checks over finished documents and reports errors and
//! warnings. Used by both `gridmap validate` and `gridmap build --validate`.
//! Shape disagreements are the only errors; the rest are advisory.

mod checks;
mod warning;

pub use checks::{
    check_duplicate_ids, check_empty_map, check_entity_footing, check_registry_link,
    check_schema_version, check_shape, check_unknown_tiles,
};
pub use warning::{Diagnostic, Severity, ValidationResult};

use crate::registry::TileRegistry;
use crate::types::MapDocument;

/// Run every per-document check.
pub fn validate_document(doc: &MapDocument, registry: &TileRegistry) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(check_shape(doc));
    result.merge(check_empty_map(doc));
    result.merge(check_schema_version(doc));
    result.merge(check_registry_link(doc, registry));
    result.merge(check_unknown_tiles(doc, registry));
    result.merge(check_entity_footing(doc, registry));

    result
}

/// Run every check over a set of documents, including cross-document ones.
pub fn validate_documents(docs: &[MapDocument], registry: &TileRegistry) -> ValidationResult {
    let mut result = ValidationResult::new();

    for doc in docs {
        result.merge(validate_document(doc, registry));
    }
    result.merge(check_duplicate_ids(docs));

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::codes;
    use crate::types::{assemble, Grid};

    fn doc(id: &str) -> MapDocument {
        assemble(
            id,
            id,
            32,
            4,
            3,
            Grid::new(4, 3, codes::GRASS),
            Grid::overlay(4, 3),
            "gridmap-default",
            "1.0.0",
        )
    }

    #[test]
    fn test_clean_document() {
        let registry = TileRegistry::builtin();
        assert!(validate_document(&doc("a"), &registry).is_ok());
    }

    #[test]
    fn test_shape_error_and_warnings_together() {
        let registry = TileRegistry::builtin();
        let mut d = doc("a");
        d.base_tiles[1].pop();
        d.base_tiles[0][0] = 99;

        let result = validate_document(&d, &registry);
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.warning_count(), 1);
    }

    #[test]
    fn test_validate_documents_flags_duplicates() {
        let registry = TileRegistry::builtin();
        let result = validate_documents(&[doc("a"), doc("a"), doc("b")], &registry);
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.warning_count(), 0);
    }
}
