use std::fs;
use std::path::Path;

use serde_json::json;
use tempfile::TempDir;

use super::SearchConfig;
use crate::engine::OutputFormat;
use crate::error::ConfigError;

/// Load with the `SEARCH_*` environment layer present but reading nothing
fn load(
    custom_config: Option<&Path>,
    cli_overrides: Option<serde_json::Value>,
) -> Result<SearchConfig, ConfigError> {
    let env = SearchConfig::env().filter(|_| false);
    let figment = SearchConfig::figment_with_env(custom_config, cli_overrides, env)?;
    SearchConfig::from_figment(&figment)
}

fn write_config(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_config_loads_defaults() {
    let temp = TempDir::new().unwrap();
    let empty = write_config(&temp, "empty.toml", "");

    let config = load(Some(&empty), None::<serde_json::Value>)
        .expect("Should load default config");

    assert!(config.patterns.negation);
    assert!(config.walk.hidden);
    assert!(!config.walk.gitignore);
    assert!(!config.walk.follow_symlinks);
    assert_eq!(config.walk.max_depth, None);
    assert_eq!(config.output.format, OutputFormat::Text);
    assert!(!config.output.stats);
}

#[test]
fn test_embedded_defaults_match_struct_defaults() {
    let temp = TempDir::new().unwrap();
    let empty = write_config(&temp, "empty.toml", "");

    let config = load(Some(&empty), None::<serde_json::Value>).unwrap();
    assert_eq!(config, SearchConfig::default());
}

#[test]
fn test_toml_file_overrides_defaults() {
    let temp = TempDir::new().unwrap();
    let path = write_config(
        &temp,
        "search.toml",
        "[patterns]\nnegation = false\n\n[walk]\nmax_depth = 2\ngitignore = true\n",
    );

    let config = load(Some(&path), None::<serde_json::Value>).unwrap();
    assert!(!config.patterns.negation);
    assert_eq!(config.walk.max_depth, Some(2));
    assert!(config.walk.gitignore);
    // Untouched keys keep their defaults
    assert!(config.walk.hidden);
}

#[test]
fn test_json_and_yaml_by_extension() {
    let temp = TempDir::new().unwrap();
    let json_path = write_config(&temp, "search.json", r#"{"output": {"format": "json"}}"#);
    let yaml_path = write_config(&temp, "search.yaml", "output:\n  stats: true\n");

    let config = load(Some(&json_path), None::<serde_json::Value>).unwrap();
    assert_eq!(config.output.format, OutputFormat::Json);

    let config = load(Some(&yaml_path), None::<serde_json::Value>).unwrap();
    assert!(config.output.stats);
}

#[test]
fn test_unknown_extension_is_sniffed() {
    let temp = TempDir::new().unwrap();
    let path = write_config(&temp, "searchrc", "walk:\n  hidden: false\n");

    let config = load(Some(&path), None::<serde_json::Value>).unwrap();
    assert!(!config.walk.hidden);
}

#[test]
fn test_missing_custom_config_is_an_error() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope.toml");

    let err = load(Some(&missing), None::<serde_json::Value>).unwrap_err();
    assert!(matches!(err, ConfigError::MissingFile(p) if p == missing));
}

#[test]
fn test_cli_overrides_win_over_file() {
    let temp = TempDir::new().unwrap();
    let path = write_config(&temp, "search.toml", "[walk]\nmax_depth = 2\nhidden = false\n");

    let overrides = json!({ "walk": { "max_depth": 5 }, "output": { "stats": true } });
    let config = load(Some(&path), Some(overrides)).unwrap();

    assert_eq!(config.walk.max_depth, Some(5));
    assert!(config.output.stats);
    // Keys the CLI did not set still come from the file
    assert!(!config.walk.hidden);
}

#[test]
fn test_invalid_value_type_is_a_load_error() {
    let temp = TempDir::new().unwrap();
    let path = write_config(&temp, "search.toml", "[walk]\nmax_depth = \"deep\"\n");

    let err = load(Some(&path), None::<serde_json::Value>).unwrap_err();
    assert!(matches!(err, ConfigError::Load(_)));
}

#[test]
fn test_unknown_output_format_is_rejected() {
    let temp = TempDir::new().unwrap();
    let path = write_config(&temp, "search.toml", "[output]\nformat = \"xml\"\n");

    assert!(load(Some(&path), None::<serde_json::Value>).is_err());
}
