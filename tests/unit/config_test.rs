//! Unit tests for configuration

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use ttyr::ttyrec::{TerminalShape, TtyrecVersion};
use ttyr::Config;

#[test]
fn config_default_values() {
    let config = Config::default();
    assert_eq!(config.replay.rows, 25);
    assert_eq!(config.replay.columns, 80);
    assert_eq!(config.replay.batch_size, 50);
    assert_eq!(config.replay.default_version, 3);
    assert_eq!(config.render.output_dir, PathBuf::from("ttyrec_renders"));
    assert!(config.render.ordered);
    assert!(!config.render.color);
    assert_eq!(config.advance.no_progress_timeout, 150);
    assert_eq!(config.advance.max_episode_steps, 100_000);
    assert!(config.advance.row_zero_fusion);
}

#[test]
fn config_file_drives_derived_options() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[replay]
rows = 24
columns = 100
batch_size = 10
default_version = 2

[render]
n_jobs = 0
ordered = false

[advance]
continue_key = 32
row_zero_fusion = false
"#,
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    let replay = config.replay_options(None);
    assert_eq!(replay.shape, TerminalShape::new(24, 100));
    assert_eq!(replay.batch_size, 10);
    assert_eq!(replay.version, Some(TtyrecVersion::V2));

    let batch = config.batch_options();
    assert_eq!(batch.n_jobs, 0);
    assert!(!batch.ordered);

    assert!(!config.aligner().row_zero_fusion());
}

#[test]
fn config_rejects_malformed_toml() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "[replay\nrows = ").unwrap();
    let err = Config::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test]
fn config_rejects_zero_columns() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "[replay]\ncolumns = 0\n").unwrap();
    let err = Config::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("Invalid config"));
}

#[test]
fn config_show_output_parses_back() {
    let config = Config::default();
    let text = toml::to_string_pretty(&config).unwrap();
    assert!(text.contains("[replay]"));
    assert!(text.contains("[advance]"));
    let parsed: Config = toml::from_str(&text).unwrap();
    assert_eq!(parsed, config);
}
