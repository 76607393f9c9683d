//! Integration tests for TOML configuration loading and saving

use std::fs;
use taskweave::TaskweaveConfig;
use tempfile::TempDir;

#[test]
fn test_config_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");

    let mut config = TaskweaveConfig::default();
    config.planner.optimize_dependencies = true;
    config.advisory.bottleneck_dependents_threshold = 10;
    config.advisory.min_parallel_efficiency_pct = 75.0;

    config.to_toml_file(&path).unwrap();
    let restored = TaskweaveConfig::from_toml_file(&path).unwrap();

    assert!(restored.planner.optimize_dependencies);
    assert_eq!(restored.advisory.bottleneck_dependents_threshold, 10);
    assert_eq!(restored.advisory.min_parallel_efficiency_pct, 75.0);
    // Untouched fields keep their defaults
    assert_eq!(restored.advisory.critical_path_length_threshold, 5);
}

#[test]
fn test_partial_config_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");

    fs::write(
        &path,
        "[advisory]\n\
         critical_path_length_threshold = 8\n",
    )
    .unwrap();

    let config = TaskweaveConfig::from_toml_file(&path).unwrap();

    assert_eq!(config.advisory.critical_path_length_threshold, 8);
    assert_eq!(config.advisory.bottleneck_dependents_threshold, 3);
    assert!(!config.planner.optimize_dependencies);
}

#[test]
fn test_empty_config_file_is_all_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "").unwrap();

    let config = TaskweaveConfig::from_toml_file(&path).unwrap();

    assert!(!config.planner.optimize_dependencies);
    assert_eq!(config.advisory.min_parallel_efficiency_pct, 50.0);
}

#[test]
fn test_malformed_config_file_errors() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "[planner\noptimize_dependencies = maybe").unwrap();

    assert!(TaskweaveConfig::from_toml_file(&path).is_err());
}
