//! End-to-end tests: grid primitives, script painting, document output.

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use tempfile::tempdir;

use gridmap::cli::build::{build_maps, BuildOptions};
use gridmap::codes;
use gridmap::output::Printer;
use gridmap::{
    assemble, discover, load_map_script, place_point_entity, read_document, validate_document,
    write_document, Footprint, Grid, MapError, MapPainter, TileRegistry,
};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn paint_fixture(name: &str) -> gridmap::MapDocument {
    let registry = TileRegistry::builtin();
    let script = load_map_script(&fixtures_dir().join("maps").join(name)).unwrap();
    MapPainter::new(&registry).paint(&script).unwrap()
}

fn options(output: &Path) -> BuildOptions {
    BuildOptions {
        output: output.to_path_buf(),
        tile_size: 32,
        validate: true,
    }
}

// -- Grid primitives --

#[test]
fn fill_rect_inside_fresh_grid() {
    let mut grid = Grid::new(4, 3, 1);
    grid.fill_rect(1, 1, 2, 2, 2);

    assert_eq!(
        grid.into_rows(),
        vec![vec![1, 1, 1, 1], vec![1, 2, 2, 1], vec![1, 2, 2, 1]]
    );
}

#[test]
fn hline_across_full_row() {
    let mut grid = Grid::new(5, 5, 0);
    grid.hline(2, 0, 4, 9);

    let rows = grid.into_rows();
    assert_eq!(rows[2], vec![9; 5]);
    for (i, row) in rows.iter().enumerate() {
        if i != 2 {
            assert_eq!(row, &vec![0; 5]);
        }
    }
}

#[test]
fn footprint_hanging_off_corner() {
    let mut grid = Grid::new(4, 4, 0);
    let written = grid.stamp_footprint(&Footprint::new("t", vec![vec![7, 7], vec![8, 8]]), 3, 3);

    assert_eq!(written, 1);
    let rows = grid.into_rows();
    assert_eq!(rows[3], vec![0, 0, 0, 7]);
    assert_eq!(rows.iter().flatten().filter(|&&t| t != 0).count(), 1);
}

#[test]
fn missing_row_is_shape_mismatch() {
    let mut doc = assemble(
        "m",
        "M",
        32,
        5,
        5,
        Grid::new(5, 5, 1),
        Grid::overlay(5, 5),
        "gridmap-default",
        "1.0.0",
    );
    doc.base_tiles.pop();

    match doc.validate() {
        Err(MapError::ShapeMismatch {
            map_id, problems, ..
        }) => {
            assert_eq!(map_id, "m");
            assert_eq!(problems, vec!["baseTiles has 4 rows, expected 5".to_string()]);
        }
        other => panic!("expected shape mismatch, got {:?}", other),
    }
}

#[test]
fn point_entity_writes_both_layers() {
    let mut base = Grid::new(3, 3, 1);
    let mut overlay = Grid::overlay(3, 3);

    assert!(place_point_entity(&mut base, &mut overlay, 2, 2, 99, 2));

    assert_eq!(
        base.into_rows(),
        vec![vec![1, 1, 1], vec![1, 1, 1], vec![1, 1, 2]]
    );
    assert_eq!(
        overlay.into_rows(),
        vec![
            vec![None, None, None],
            vec![None, None, None],
            vec![None, None, Some(99)],
        ]
    );
}

#[test]
fn point_entity_off_map_writes_neither() {
    let mut base = Grid::new(3, 3, 1);
    let mut overlay = Grid::overlay(3, 3);

    assert!(!place_point_entity(&mut base, &mut overlay, 3, 0, 99, 2));
    assert_eq!(base.count(&1), 9);
    assert_eq!(overlay.count(&None), 9);
}

// -- Script painting --

#[test]
fn coastal_route_paints_as_written() {
    let doc = paint_fixture("coastal_route.map.yaml");

    assert_eq!((doc.width, doc.height), (25, 30));
    assert!(doc.validate().is_ok());

    // Border.
    assert_eq!(doc.base_tiles[0], vec![codes::TREE; 25]);
    assert_eq!(doc.base_at(24, 10), Some(codes::TREE));

    // Lake: frame, then surf, then the bridge line over all of it.
    assert_eq!(doc.base_at(15, 19), Some(codes::WATER_EDGE));
    assert_eq!(doc.base_at(16, 21), Some(codes::WATER));
    assert_eq!(doc.base_at(17, 21), Some(codes::SURF_WATER));
    assert_eq!(doc.base_tiles[22][13..23], [codes::BRIDGE; 10]);

    // Cave entrance stamp.
    assert_eq!(doc.base_tiles[25][3..6], [codes::TREE; 3]);
    assert_eq!(doc.base_tiles[26][3..6], [codes::CAVE; 3]);

    // Entities: the scatter offset at (30, 30) and the warp past the east
    // edge are clipped.
    assert_eq!(doc.entity_count(), 6);
    assert_eq!(doc.overlay_at(9, 2), Some(codes::SIGN));
    assert_eq!(doc.base_at(9, 2), Some(codes::PATH));
    assert_eq!(doc.overlay_at(17, 4), Some(codes::ITEM));
    assert_eq!(doc.base_at(17, 4), Some(codes::TALL_GRASS));
    assert_eq!(doc.overlay_at(14, 3), Some(codes::HIDDEN_ITEM));
    assert_eq!(doc.overlay_at(21, 8), Some(codes::HIDDEN_ITEM));
    assert_eq!(doc.base_at(21, 8), Some(codes::TALL_GRASS));
}

#[test]
fn greenleaf_town_stamps_and_last_write_wins() {
    let doc = paint_fixture("greenleaf_town.map.yaml");

    assert_eq!(doc.tile_size, 16);
    assert_eq!(doc.base_tiles[2][2..6], [3, 3, 3, 3]);
    assert_eq!(doc.base_tiles[5][2..6], [6, 4, 4, 6]);
    assert_eq!(doc.base_at(14, 4), Some(codes::SHOP));

    // Inline footprint.
    assert_eq!(doc.base_tiles[15][6..9], [codes::BRIDGE; 3]);
    assert_eq!(doc.base_tiles[16][6..9], [codes::WATER_EDGE; 3]);

    // The second entity call replaced the first one's base tile.
    assert_eq!(doc.base_at(12, 13), Some(codes::GRASS));
    assert_eq!(doc.overlay_at(12, 13), Some(codes::ITEM));
    assert_eq!(doc.entity_count(), 3);
}

#[test]
fn fixtures_pass_advisory_checks() {
    let registry = TileRegistry::builtin();
    for name in ["coastal_route.map.yaml", "greenleaf_town.map.yaml"] {
        let result = validate_document(&paint_fixture(name), &registry);
        assert!(result.is_ok(), "{}: {:?}", name, result);
    }
}

#[test]
fn custom_registry_project() {
    let project = discover(fixtures_dir().join("crypt")).unwrap();
    let registry = project.registry().unwrap();
    assert!(project.has_manifest);
    assert_eq!(project.manifest.effective_tile_size(), 24);
    assert_eq!(project.scan.scripts.len(), 1);

    let script = load_map_script(&project.scan.scripts[0]).unwrap();
    let doc = MapPainter::new(&registry)
        .with_tile_size(project.manifest.effective_tile_size())
        .paint(&script)
        .unwrap();

    assert_eq!(doc.registry_id, "dungeon-tiles");
    assert_eq!(doc.registry_version, "0.3.0");
    assert_eq!(doc.tile_size, 24);
    assert_eq!(doc.base_tiles[3], vec![1, 0, 0, 0, 2, 0, 0, 1]);
    assert_eq!(doc.overlay_at(2, 2), Some(3));
    assert!(validate_document(&doc, &registry).is_ok());
}

// -- Output --

#[test]
fn write_then_read_document() {
    let dir = tempdir().unwrap();
    let doc = paint_fixture("greenleaf_town.map.yaml");
    let path = dir.path().join("nested/out/greenleaf_town.map.json");

    write_document(&doc, &path).unwrap();

    assert_eq!(read_document(&path).unwrap(), doc);
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"mapId\": \"greenleaf_town\""));
    assert!(text.contains("\"registryId\": \"gridmap-default\""));
}

#[test]
fn ragged_document_never_written() {
    let dir = tempdir().unwrap();
    let mut doc = paint_fixture("coastal_route.map.yaml");
    doc.overlay_tiles[7].pop();
    let path = dir.path().join("out/coastal_route.map.json");

    let err = write_document(&doc, &path).unwrap_err();

    assert!(err.to_string().contains("overlayTiles row 7 has 24 cols, expected 25"));
    assert!(!path.exists());
}

#[test]
fn build_fixture_directory() {
    let dir = tempdir().unwrap();
    let project = discover(fixtures_dir().join("maps")).unwrap();
    let out = dir.path().join("dist");

    let report = build_maps(
        &project.scan.scripts,
        &TileRegistry::builtin(),
        &options(&out),
        &Printer::new(),
    );

    assert!(report.is_success());
    assert_eq!(
        report.written,
        vec![
            out.join("coastal_route.map.json"),
            out.join("greenleaf_town.map.json"),
        ]
    );
    assert!(report.diagnostics.is_ok());
}

#[test]
fn build_continues_past_broken_map() {
    let dir = tempdir().unwrap();
    let broken = dir.path().join("broken.map.yaml");
    fs::write(
        &broken,
        "id: broken\nname: Broken\nwidth: 4\nheight: 4\ndraw:\n  - { op: stamp, footprint: castle, col: 0, row: 0 }\n",
    )
    .unwrap();

    let mut scripts = vec![broken.clone()];
    scripts.push(fixtures_dir().join("maps/coastal_route.map.yaml"));
    let out = dir.path().join("dist");

    let report = build_maps(&scripts, &TileRegistry::builtin(), &options(&out), &Printer::new());

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].0, broken);
    assert_eq!(report.written, vec![out.join("coastal_route.map.json")]);
}
