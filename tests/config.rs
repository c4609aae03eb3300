//! Configuration system tests
//!
//! Tests for config paths, generator config, and overlay loading/merging.

use std::fs;
use std::path::PathBuf;

use tempfile::tempdir;

use chordmap::cli::{CliArgs, OutputTarget};
use chordmap::config::GeneratorConfig;
use chordmap::config_paths;
use chordmap::keymap::{compile, default_table, load_overlay_file, load_table, KeymapError};

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_contains_app_name() {
    if let Some(dir) = config_paths::config_dir() {
        assert!(dir.to_string_lossy().contains("chordmap"));
    }
}

#[test]
fn test_config_file_ends_with_yaml() {
    if let Some(path) = config_paths::config_file() {
        assert!(path.to_string_lossy().ends_with("config.yaml"));
    }
}

#[test]
fn test_overlay_file_is_in_config_dir() {
    if let (Some(config), Some(overlay)) =
        (config_paths::config_dir(), config_paths::overlay_file())
    {
        assert!(overlay.starts_with(&config));
        assert!(overlay.to_string_lossy().ends_with("overlay.yaml"));
    }
}

#[test]
fn test_logs_dir_is_subdir_of_config() {
    if let (Some(config), Some(logs)) = (config_paths::config_dir(), config_paths::logs_dir()) {
        assert!(logs.starts_with(&config));
    }
}

// ========================================================================
// Generator Config Tests
// ========================================================================

#[test]
fn test_load_from_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.yaml");
    fs::write(
        &path,
        "manifest: package.json\npretty: false\ncheck_alias_collisions: false\n",
    )
    .expect("Failed to write config");

    let config = GeneratorConfig::load_from(&path).unwrap();
    assert_eq!(config.manifest, Some(dir.path().join("package.json")));
    assert!(!config.pretty);
    assert!(!config.check_alias_collisions);
}

#[test]
fn test_load_from_missing_file_is_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    let err = GeneratorConfig::load_from(&dir.path().join("nope.yaml")).unwrap_err();
    assert!(err.contains("Failed to read config"));
}

#[test]
fn test_load_from_invalid_yaml_is_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.yaml");
    fs::write(&path, "pretty: [1, 2").expect("Failed to write config");

    let err = GeneratorConfig::load_from(&path).unwrap_err();
    assert!(err.contains("Failed to parse config"));
}

#[test]
fn test_cli_config_flag_loads_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.yaml");
    fs::write(&path, "output: bindings.json\n").expect("Failed to write config");

    let args = CliArgs {
        config: Some(path),
        ..Default::default()
    };
    let generator = args.load_config().unwrap();
    let run = args.into_config(generator);
    assert_eq!(
        run.target,
        OutputTarget::File(dir.path().join("bindings.json"))
    );
}

#[test]
fn test_config_paths_resolve_against_config_dir() {
    let dir = tempdir().expect("Failed to create temp dir");
    fs::write(dir.path().join("work.yaml"), OVERLAY).expect("Failed to write overlay");
    let path = dir.path().join("config.yaml");
    fs::write(&path, "overlay: work.yaml\noutput: /tmp/bindings.json\n")
        .expect("Failed to write config");

    let config = GeneratorConfig::load_from(&path).unwrap();
    assert_eq!(config.output, Some(PathBuf::from("/tmp/bindings.json")));

    let overlay = config.overlay_path().expect("overlay should be set");
    assert_eq!(overlay, dir.path().join("work.yaml"));
    assert_eq!(load_overlay_file(&overlay).unwrap().len(), 2);
}

#[test]
fn test_home_relative_overlay_is_expanded() {
    let Some(home) = dirs::home_dir() else {
        return;
    };
    let config = GeneratorConfig::parse("overlay: ~/work.yaml\n").unwrap();
    assert_eq!(config.overlay_path(), Some(home.join("work.yaml")));
}

// ========================================================================
// Overlay Tests
// ========================================================================

const OVERLAY: &str = r#"
bindings:
  - key: "ctrl+x g"
    command: git.openChange
  - key: "alt+m"
    command: groog.message.info
    when: editorTextFocus
    args:
      message: hello
"#;

#[test]
fn test_load_overlay_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("overlay.yaml");
    fs::write(&path, OVERLAY).expect("Failed to write overlay");

    let table = load_overlay_file(&path).unwrap();
    assert_eq!(table.len(), 2);
}

#[test]
fn test_load_overlay_missing_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let err = load_overlay_file(&dir.path().join("missing.yaml")).unwrap_err();
    assert!(matches!(err, KeymapError::IoError(_)));
}

#[test]
fn test_load_table_merges_overlay() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("overlay.yaml");
    fs::write(&path, OVERLAY).expect("Failed to write overlay");

    let base = default_table().unwrap().len();
    let table = load_table(Some(&path)).unwrap();
    assert_eq!(table.len(), base + 2);

    let records = compile(table).unwrap();
    let message = records
        .iter()
        .find(|r| r.key == "alt+m")
        .expect("overlay key should be compiled");
    assert_eq!(message.when, "editorTextFocus");
    assert_eq!(message.args.as_ref().unwrap()["message"], "hello");
}

#[test]
fn test_overlay_conflict_fails_compile() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("overlay.yaml");
    fs::write(&path, "bindings:\n  - key: ctrl+x s\n    command: noop\n")
        .expect("Failed to write overlay");

    let table = load_table(Some(&path)).unwrap();
    assert_eq!(
        compile(table),
        Err(KeymapError::DuplicateKey("ctrl+x s".to_string()))
    );
}
