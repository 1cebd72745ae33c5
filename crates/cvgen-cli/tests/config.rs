use cvgen_cli::config::{CvgenConfig, load_config, migrate, save_config};
use cvgen_core::geometry::PageGeometry;
use serde_json::json;

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_config(&dir.path().join("config.json")).unwrap();
    assert_eq!(config.config_version, 1);
    assert_eq!(config.export.scale_factor, 2.0);
    assert_eq!(config.export.jpeg_quality, 95);
    assert_eq!(config.export.geometry, PageGeometry::A4);
}

#[test]
fn v0_flat_settings_move_under_export() {
    let migrated = migrate(json!({ "scale_factor": 3.0, "jpeg_quality": 80 }), 0).unwrap();
    assert_eq!(migrated["config_version"], 1);
    assert_eq!(migrated["export"]["scale_factor"], 3.0);
    assert_eq!(migrated["export"]["jpeg_quality"], 80);
    assert!(migrated.get("scale_factor").is_none());
}

#[test]
fn v0_migration_keeps_explicit_nested_values() {
    let migrated = migrate(
        json!({ "jpeg_quality": 80, "export": { "jpeg_quality": 90 } }),
        0,
    )
    .unwrap();
    assert_eq!(migrated["export"]["jpeg_quality"], 90);
}

#[test]
fn newer_version_is_refused() {
    let err = migrate(json!({ "config_version": 99 }), 99).unwrap_err();
    assert!(err.to_string().contains("newer than this build supports"));
}

#[test]
fn unversioned_file_is_migrated_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "jpeg_quality": 70 }"#).unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.config_version, 1);
    assert_eq!(config.export.jpeg_quality, 70);
    assert_eq!(config.export.scale_factor, 2.0);
}

#[test]
fn out_of_range_settings_fail_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "config_version": 1, "export": { "scale_factor": 0.5 } }"#).unwrap();
    assert!(load_config(&path).is_err());
}

#[test]
fn saved_config_is_stamped_with_current_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");
    let mut config = CvgenConfig::default();
    config.export.geometry = PageGeometry::LETTER;

    save_config(&path, &config).unwrap();
    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["config_version"], 1);
    assert!(!dir.path().join("nested").join("config.json.tmp").exists());

    let loaded = load_config(&path).unwrap();
    assert_eq!(loaded.export.geometry, PageGeometry::LETTER);
}
