use moviesearch::config::{Config, ConfigError};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write config");
    file
}

/// Test that Config::default() produces the documented values.
#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.ui.tick_rate_ms, 250);
    assert_eq!(config.ui.toast_duration_ms, 2000);
    assert_eq!(config.ui.tick_rate(), Duration::from_millis(250));
    assert_eq!(config.ui.toast_duration(), Duration::from_secs(2));

    assert!(config.catalog.path.is_none());

    assert_eq!(config.history.max_entries, 20);
    assert!(config.history.persist);
    assert!(config.history.path.is_none());

    assert_eq!(config.logging.level, "info");
    assert!(config.logging.file.is_none());
}

#[test]
fn test_config_path_ends_with_expected() {
    let path = Config::config_path();
    assert!(path.ends_with("moviesearch/config.toml"));
}

#[test]
fn test_default_paths_live_in_data_dir() {
    let config = Config::default();
    let data_dir = Config::data_dir();

    assert_eq!(config.history_path(), Some(data_dir.join("history.json")));
    assert_eq!(config.log_path(), data_dir.join("moviesearch.log"));
}

#[test]
fn test_validation_passes_for_default() {
    assert!(Config::default().validate().is_ok());
}

#[test]
fn test_validation_rejects_zero_tick_rate() {
    let mut config = Config::default();
    config.ui.tick_rate_ms = 0;
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("tick_rate_ms"));
}

#[test]
fn test_validation_rejects_zero_toast_duration() {
    let mut config = Config::default();
    config.ui.toast_duration_ms = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationError { .. })
    ));
}

#[test]
fn test_validation_rejects_empty_history() {
    let mut config = Config::default();
    config.history.max_entries = 0;
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("max_entries"));
}

#[test]
fn test_validation_rejects_blank_log_level() {
    let mut config = Config::default();
    config.logging.level = "  ".to_string();
    assert!(config.validate().is_err());
}

/// Missing sections and fields fall back to their defaults.
#[test]
fn test_partial_config_parses() {
    let file = write_config(
        r#"
[history]
max_entries = 5
"#,
    );

    let config = Config::load_from(file.path()).expect("config should load");
    assert_eq!(config.history.max_entries, 5);
    assert!(config.history.persist);
    assert_eq!(config.ui.tick_rate_ms, 250);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_full_config_parses() {
    let file = write_config(
        r#"
[ui]
tick_rate_ms = 100
toast_duration_ms = 1500

[catalog]
path = "/srv/movies/catalog.json"

[history]
path = "/tmp/moviesearch-history.json"
max_entries = 3
persist = true

[logging]
level = "debug"
file = "/tmp/moviesearch.log"
"#,
    );

    let config = Config::load_from(file.path()).expect("config should load");
    assert_eq!(config.ui.tick_rate(), Duration::from_millis(100));
    assert_eq!(config.ui.toast_duration(), Duration::from_millis(1500));
    assert_eq!(
        config.catalog.path,
        Some(PathBuf::from("/srv/movies/catalog.json"))
    );
    assert_eq!(
        config.history_path(),
        Some(PathBuf::from("/tmp/moviesearch-history.json"))
    );
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.log_path(), PathBuf::from("/tmp/moviesearch.log"));
}

#[test]
fn test_persist_false_keeps_history_in_memory() {
    let file = write_config(
        r#"
[history]
path = "/tmp/ignored.json"
persist = false
"#,
    );

    let config = Config::load_from(file.path()).expect("config should load");
    assert_eq!(config.history_path(), None);
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let file = write_config("[ui\ntick_rate_ms = ");
    assert!(matches!(
        Config::load_from(file.path()),
        Err(ConfigError::ParseError { .. })
    ));
}

#[test]
fn test_wrong_type_is_parse_error() {
    let file = write_config("[ui]\ntick_rate_ms = \"fast\"\n");
    assert!(matches!(
        Config::load_from(file.path()),
        Err(ConfigError::ParseError { .. })
    ));
}

#[test]
fn test_loaded_config_is_validated() {
    let file = write_config("[history]\nmax_entries = 0\n");
    assert!(matches!(
        Config::load_from(file.path()),
        Err(ConfigError::ValidationError { .. })
    ));
}

#[test]
fn test_missing_file_is_read_error() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nope.toml");
    match Config::load_from(&path) {
        Err(ConfigError::ReadError { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected ReadError, got {other:?}"),
    }
}
