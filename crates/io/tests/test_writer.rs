//! Integration test: compute a small tile and write its products.

use clearsky_calendar::AcqDate;
use clearsky_engine::{CsoConfig, NODATA, StatisticKind, StatisticSet, clear_sky_observations};
use clearsky_io::{TileId, WriterConfig, parse_tile, write_products};
use serde_json::Value;

const TILE: &str = r#"{
    "tile_x": 12,
    "tile_y": 7,
    "n_pixels": 2,
    "acquisitions": [
        { "date": "2021-03-11", "valid": [1, 1] },
        { "date": "2021-04-06", "valid": [1, 1] },
        { "date": "2021-04-21", "valid": [1, 0] }
    ],
    "mask": [1, 0]
}"#;

fn products() -> clearsky_engine::ProductSet {
    let tile = parse_tile(TILE).expect("fixture is valid");
    let config = CsoConfig::new(
        AcqDate::new(2021, 3, 1).unwrap(),
        AcqDate::new(2021, 5, 1).unwrap(),
    )
    .with_target("LNDLG")
    .with_statistics(
        StatisticSet::new()
            .with(StatisticKind::Count)
            .with(StatisticKind::Max),
    );
    clear_sky_observations(tile.series(), tile.mask(), &config).expect("run succeeds")
}

fn read_json(path: &std::path::Path) -> Value {
    let text = std::fs::read_to_string(path).expect("read product");
    serde_json::from_str(&text).expect("valid json")
}

#[test]
fn write_flat_layout() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let products = products();

    let written = write_products(
        dir.path(),
        TileId::new(12, 7),
        &products,
        &WriterConfig::default(),
    )
    .expect("write succeeds");

    assert_eq!(written.len(), 2);
    let num_path = dir
        .path()
        .join("X0012_Y0007")
        .join("2021-2021_001-366-01_HL_CSO_LNDLG_NUM.json");
    assert_eq!(written[0], num_path);

    let doc = read_json(&num_path);
    assert_eq!(doc["product"], "NUM");
    assert_eq!(doc["tile_x"], 12);
    assert_eq!(doc["n_pixels"], 2);
    assert_eq!(doc["nodata"], i64::from(NODATA));

    let bands = doc["bands"].as_array().expect("bands array");
    assert_eq!(bands.len(), 2);
    assert_eq!(bands[0]["index"], 1);
    assert_eq!(bands[0]["label"], "20210301");
    assert_eq!(bands[1]["date"], "2021-04-01");
    // pixel 1 is masked out
    assert_eq!(bands[0]["values"], serde_json::json!([1, NODATA]));
    assert_eq!(bands[1]["values"], serde_json::json!([2, NODATA]));
}

#[test]
fn write_subfolders_and_skip_unsaved() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let mut products = products();
    // drop March from every product, and MAX entirely
    for product in products.products_mut() {
        let drop_all = product.code() == "MAX";
        for band in product.bands_mut() {
            if drop_all || band.label() == "20210301" {
                band.set_save(false);
            }
        }
    }

    let config = WriterConfig::default().with_subfolders(true).with_pretty(true);
    let written =
        write_products(dir.path(), TileId::new(12, 7), &products, &config).expect("write succeeds");

    assert_eq!(written.len(), 1);
    assert!(written[0].starts_with(dir.path().join("X0012_Y0007").join("NUM")));
    assert!(!dir.path().join("X0012_Y0007").join("MAX").exists());

    let doc = read_json(&written[0]);
    let bands = doc["bands"].as_array().expect("bands array");
    assert_eq!(bands.len(), 1);
    assert_eq!(bands[0]["index"], 2);
    assert_eq!(bands[0]["label"], "20210401");
}

#[test]
fn write_into_file_fails() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let blocker = dir.path().join("X0012_Y0007");
    std::fs::write(&blocker, "not a directory").expect("write blocker");

    let result = write_products(
        dir.path(),
        TileId::new(12, 7),
        &products(),
        &WriterConfig::default(),
    );
    assert!(matches!(result, Err(clearsky_io::IoError::Io { .. })));
}
