//! Validation checks for map documents.
//!
//! Each check looks at a document (or a set of them) and returns a
//! `ValidationResult`. Only shape problems are errors; everything else is
//! advisory.

use std::collections::{BTreeMap, HashMap};

use crate::registry::TileRegistry;
use crate::types::{MapDocument, TileId, SCHEMA_VERSION};

use super::warning::{Diagnostic, ValidationResult};

/// Report every disagreement between declared size and layer rows.
pub fn check_shape(doc: &MapDocument) -> ValidationResult {
    let mut result = ValidationResult::new();

    for problem in doc.shape_problems() {
        result.push(
            Diagnostic::error(
                "gridmap::validate::shape-mismatch",
                format!("declared {}x{}, {}", doc.width, doc.height, problem),
            )
            .for_map(&doc.map_id)
            .with_help("Both layers must have `height` rows of `width` cells"),
        );
    }

    result
}

/// Flag maps with no cells.
pub fn check_empty_map(doc: &MapDocument) -> ValidationResult {
    let mut result = ValidationResult::new();

    if doc.width == 0 || doc.height == 0 {
        result.push(
            Diagnostic::warning(
                "gridmap::validate::empty-map",
                format!("map is {}x{} and has no cells", doc.width, doc.height),
            )
            .for_map(&doc.map_id),
        );
    }

    result
}

/// Flag documents written with another schema version.
pub fn check_schema_version(doc: &MapDocument) -> ValidationResult {
    let mut result = ValidationResult::new();

    if doc.schema_version != SCHEMA_VERSION {
        result.push(
            Diagnostic::warning(
                "gridmap::validate::schema-version",
                format!(
                    "schema version {} (this build writes {})",
                    doc.schema_version, SCHEMA_VERSION
                ),
            )
            .for_map(&doc.map_id)
            .with_help("Rebuild the map with `gridmap build`"),
        );
    }

    result
}

/// Flag documents linked to a different registry than the one in use.
pub fn check_registry_link(doc: &MapDocument, registry: &TileRegistry) -> ValidationResult {
    let mut result = ValidationResult::new();

    if doc.registry_id != registry.id() || doc.registry_version != registry.version() {
        result.push(
            Diagnostic::warning(
                "gridmap::validate::registry-mismatch",
                format!(
                    "built against registry {} {}, checking with {} {}",
                    doc.registry_id,
                    doc.registry_version,
                    registry.id(),
                    registry.version()
                ),
            )
            .for_map(&doc.map_id),
        );
    }

    result
}

/// Flag tile codes the registry does not define.
///
/// One warning per distinct code, with the number of cells using it.
pub fn check_unknown_tiles(doc: &MapDocument, registry: &TileRegistry) -> ValidationResult {
    let mut unknown: BTreeMap<TileId, usize> = BTreeMap::new();

    let base = doc.base_tiles.iter().flatten().copied();
    let overlay = doc.overlay_tiles.iter().flatten().filter_map(|c| *c);
    for code in base.chain(overlay) {
        if !registry.contains(code) {
            *unknown.entry(code).or_insert(0) += 1;
        }
    }

    let mut result = ValidationResult::new();
    for (code, cells) in unknown {
        result.push(
            Diagnostic::warning(
                "gridmap::validate::unknown-tile",
                format!(
                    "tile code {} is not in registry '{}' ({} cell{})",
                    code,
                    registry.id(),
                    cells,
                    if cells == 1 { "" } else { "s" }
                ),
            )
            .for_map(&doc.map_id)
            .with_help("Run `gridmap tiles` to list registered codes"),
        );
    }

    result
}

/// Flag overlay entities standing on non-walkable base tiles.
pub fn check_entity_footing(doc: &MapDocument, registry: &TileRegistry) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (row, cells) in doc.overlay_tiles.iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            let (Some(entity), Some(base)) = (*cell, doc.base_at(col, row)) else {
                continue;
            };
            if registry.is_walkable(base) != Some(false) {
                continue;
            }

            let name = |code: TileId| {
                registry
                    .get(code)
                    .map_or_else(|| code.to_string(), |k| k.name.clone())
            };
            result.push(
                Diagnostic::warning(
                    "gridmap::validate::entity-footing",
                    format!(
                        "{} at ({}, {}) stands on non-walkable {}",
                        name(entity),
                        col,
                        row,
                        name(base)
                    ),
                )
                .for_map(&doc.map_id),
            );
        }
    }

    result
}

/// Flag map ids used by more than one document.
pub fn check_duplicate_ids(docs: &[MapDocument]) -> ValidationResult {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for doc in docs {
        *counts.entry(doc.map_id.as_str()).or_insert(0) += 1;
    }

    let mut duplicates: Vec<(&str, usize)> =
        counts.into_iter().filter(|(_, n)| *n > 1).collect();
    duplicates.sort();

    let mut result = ValidationResult::new();
    for (id, n) in duplicates {
        result.push(
            Diagnostic::error(
                "gridmap::validate::duplicate-id",
                format!("map id is used by {} documents", n),
            )
            .for_map(id)
            .with_help("Each map id names one output file; give every map a distinct id"),
        );
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::codes;
    use crate::types::{assemble, place_point_entity, Grid};

    fn doc(id: &str, width: usize, height: usize) -> MapDocument {
        assemble(
            id,
            id,
            32,
            width,
            height,
            Grid::new(width, height, codes::GRASS),
            Grid::overlay(width, height),
            "gridmap-default",
            "1.0.0",
        )
    }

    #[test]
    fn test_shape_ok() {
        assert!(check_shape(&doc("a", 3, 3)).is_ok());
    }

    #[test]
    fn test_shape_one_error_per_problem() {
        let mut d = doc("a", 3, 3);
        d.base_tiles.pop();
        d.overlay_tiles[0].push(None);

        let result = check_shape(&d);
        assert_eq!(result.error_count(), 2);
        assert!(result.iter().all(|d| d.map_id.as_deref() == Some("a")));
    }

    #[test]
    fn test_empty_map_warns() {
        let result = check_empty_map(&doc("a", 0, 4));
        assert_eq!(result.warning_count(), 1);
        assert!(!result.has_errors());
        assert!(check_empty_map(&doc("a", 1, 1)).is_ok());
    }

    #[test]
    fn test_schema_version() {
        let mut d = doc("a", 1, 1);
        assert!(check_schema_version(&d).is_ok());
        d.schema_version = 1;
        assert_eq!(check_schema_version(&d).warning_count(), 1);
    }

    #[test]
    fn test_registry_link() {
        let registry = TileRegistry::builtin();
        let mut d = doc("a", 1, 1);
        assert!(check_registry_link(&d, &registry).is_ok());

        d.registry_version = "0.9.0".to_string();
        assert_eq!(check_registry_link(&d, &registry).warning_count(), 1);
    }

    #[test]
    fn test_unknown_tiles_grouped_by_code() {
        let registry = TileRegistry::builtin();
        let mut d = doc("a", 3, 1);
        d.base_tiles[0][0] = 39;
        d.base_tiles[0][1] = 39;
        d.overlay_tiles[0][2] = Some(300);

        let result = check_unknown_tiles(&d, &registry);
        let messages: Vec<&str> = result.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "tile code 39 is not in registry 'gridmap-default' (2 cells)",
                "tile code 300 is not in registry 'gridmap-default' (1 cell)",
            ]
        );
    }

    #[test]
    fn test_entity_footing() {
        let registry = TileRegistry::builtin();
        let mut d = doc("a", 3, 1);
        d.base_tiles[0][0] = codes::TREE;
        d.overlay_tiles[0][0] = Some(codes::HIDDEN_ITEM);
        d.overlay_tiles[0][1] = Some(codes::ITEM);

        let result = check_entity_footing(&d, &registry);
        assert_eq!(result.warning_count(), 1);
        let first = result.iter().next().unwrap();
        assert_eq!(first.message, "hidden_item at (0, 0) stands on non-walkable tree");
    }

    #[test]
    fn test_placed_entities_have_footing() {
        let registry = TileRegistry::builtin();
        let mut base = Grid::new(4, 4, codes::TREE);
        let mut overlay = Grid::overlay(4, 4);
        place_point_entity(&mut base, &mut overlay, 1, 1, codes::NPC, codes::PATH);
        let d = assemble("a", "A", 32, 4, 4, base, overlay, "gridmap-default", "1.0.0");

        assert!(check_entity_footing(&d, &registry).is_ok());
    }

    #[test]
    fn test_duplicate_ids() {
        let docs = vec![doc("a", 1, 1), doc("b", 1, 1), doc("a", 2, 2)];
        let result = check_duplicate_ids(&docs);
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.for_map("a").count(), 1);
    }
}
