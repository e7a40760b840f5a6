//! Settings loading from disk.

use plumbline::Settings;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_load_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{"zoom": 1.5, "drag": {"cursor": "move", "containment": true}}"#).unwrap();

    let settings = Settings::load(&path).unwrap();
    assert_eq!(settings.zoom, 1.5);
    assert_eq!(settings.drag.cursor.as_deref(), Some("move"));
    assert!(settings.drag.containment);
}

#[test]
fn test_load_missing_file_names_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.json");

    let err = Settings::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("absent.json"));
}

#[test]
fn test_load_rejects_invalid_zoom() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{"zoom": -2}"#).unwrap();

    let err = Settings::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("zoom must be positive"));
}

#[test]
fn test_saved_settings_load_back() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let mut settings = Settings::default();
    settings.drag.grid = Some([10.0, 10.0]);
    settings.hover_class = Some("hot".into());
    fs::write(&path, settings.to_json().unwrap()).unwrap();

    assert_eq!(Settings::load(&path).unwrap(), settings);
}
