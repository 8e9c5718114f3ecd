use super::*;
use tempfile::tempdir;

#[test]
fn test_ensure_then_load_roundtrips_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.json");

    ensure_settings_file(&path).unwrap();
    assert!(path.exists());

    let settings = load_settings(&path).unwrap();
    assert_eq!(settings, ShellSettings::default());
}

#[test]
fn test_ensure_keeps_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{ "default_caption": "My IDE" }"#).unwrap();

    ensure_settings_file(&path).unwrap();
    assert_eq!(load_settings(&path).unwrap().default_caption, "My IDE");
}

#[test]
fn test_malformed_file_is_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(load_settings(&path), Err(SettingsError::Parse(_))));
    assert_eq!(load_settings_or_default(&path), ShellSettings::default());
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.json");

    assert!(matches!(load_settings(&path), Err(SettingsError::Io(_))));
    assert_eq!(load_settings_or_default(&path), ShellSettings::default());
}
