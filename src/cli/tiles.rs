//! Tiles command implementation.
//!
//! Prints the tile registry grouped by category, or as JSON on stdout.

use std::path::PathBuf;

use clap::Args;

use crate::discovery::discover;
use crate::error::{MapError, Result};
use crate::output::{plural, Printer};
use crate::registry::{TileCategory, TileKind, TileRegistry};

/// List the tile registry
#[derive(Args, Debug)]
pub struct TilesArgs {
    /// Only show one category (terrain, structure, interactive, entity, trainer, item, encounter)
    #[arg(long)]
    pub category: Option<TileCategory>,

    /// Print JSON to stdout
    #[arg(long)]
    pub json: bool,

    /// Custom tile registry file (default: from gridmap.yaml, else builtin)
    #[arg(long)]
    pub registry: Option<PathBuf>,
}

pub fn run(args: TilesArgs, printer: &Printer) -> Result<()> {
    let registry = match &args.registry {
        Some(path) => TileRegistry::load(path)?,
        None => discover(".")?.registry()?,
    };

    let kinds = select(&registry, args.category);

    if args.json {
        let json = serde_json::to_string_pretty(&kinds).map_err(|e| MapError::Build {
            message: format!("Failed to serialize tile list: {}", e),
            help: None,
        })?;
        println!("{}", json);
        return Ok(());
    }

    printer.info(
        "Registry",
        &format!(
            "{} {} ({})",
            registry.id(),
            registry.version(),
            plural(kinds.len(), "tile", "tiles")
        ),
    );

    for category in TileCategory::ALL {
        let entries: Vec<String> = kinds
            .iter()
            .filter(|k| k.category == category)
            .map(|k| describe(k, printer))
            .collect();
        if entries.is_empty() {
            continue;
        }
        printer.info(category.name(), &entries.join(", "));
    }

    Ok(())
}

/// Tile kinds ordered by code, optionally limited to one category.
fn select(registry: &TileRegistry, category: Option<TileCategory>) -> Vec<&TileKind> {
    match category {
        Some(category) => registry.by_category(category).collect(),
        None => registry.kinds().collect(),
    }
}

/// `7 tall_grass`, with blocking tiles dimmed.
fn describe(kind: &TileKind, printer: &Printer) -> String {
    let text = format!("{} {}", kind.code, kind.name);
    if kind.walkable {
        text
    } else {
        printer.dim(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::codes;

    #[test]
    fn test_select_all_ordered_by_code() {
        let registry = TileRegistry::builtin();
        let kinds = select(&registry, None);

        assert_eq!(kinds.len(), registry.len());
        assert_eq!(kinds[0].code, codes::WATER);
        assert!(kinds.windows(2).all(|w| w[0].code < w[1].code));
    }

    #[test]
    fn test_select_category() {
        let registry = TileRegistry::builtin();
        let items: Vec<&str> = select(&registry, Some(TileCategory::Item))
            .iter()
            .map(|k| k.name.as_str())
            .collect();

        assert_eq!(items, vec!["item", "key_item", "hidden_item", "pokeball"]);
    }

    #[test]
    fn test_json_output_shape() {
        let registry = TileRegistry::builtin();
        let kinds = select(&registry, Some(TileCategory::Encounter));
        let json = serde_json::to_string(&kinds).unwrap();

        assert_eq!(
            json,
            r#"[{"code":7,"name":"tall_grass","category":"encounter","walkable":true},{"code":28,"name":"rare_grass","category":"encounter","walkable":true}]"#
        );
    }

    #[test]
    fn test_run_with_custom_registry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiles.yaml");
        std::fs::write(
            &path,
            "id: tiny\nversion: 0.1.0\ntiles:\n  - { code: 0, name: floor, category: terrain, walkable: true }\n",
        )
        .unwrap();

        let args = TilesArgs {
            category: None,
            json: false,
            registry: Some(path),
        };
        run(args, &Printer::new()).unwrap();
    }
}
