//! Integration test: tile files on disk.

use std::path::Path;

use clearsky_io::{IoError, TileId, read_tile};

#[test]
fn read_tile_file_not_found() {
    let path = Path::new("/tmp/clearsky_test_nonexistent_tile.json");

    let err = read_tile(path).unwrap_err();
    assert!(
        matches!(err, IoError::FileNotFound { .. }),
        "expected FileNotFound, got {err:?}",
    );
}

#[test]
fn read_tile_from_disk() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("tile.json");
    std::fs::write(
        &path,
        r#"{
            "tile_x": 4,
            "tile_y": 19,
            "n_pixels": 2,
            "acquisitions": [
                { "date": "2021-04-06", "valid": [1, 0] },
                { "date": "2021-04-06", "valid": [0, 0] },
                { "date": "2021-04-21", "valid": [1, 1] }
            ]
        }"#,
    )
    .expect("write tile");

    let tile = read_tile(&path).expect("read succeeds");
    assert_eq!(tile.tile(), TileId::new(4, 19));
    assert_eq!(tile.series().len(), 3);
    assert!(tile.mask().is_none());
}

#[test]
fn read_tile_malformed_json() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("tile.json");
    std::fs::write(&path, "{ \"tile_x\": ").expect("write tile");

    let err = read_tile(&path).unwrap_err();
    assert!(
        matches!(err, IoError::Json { .. }),
        "expected Json error, got {err:?}",
    );
}
