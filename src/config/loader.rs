use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde_json::{Map, Value};

use crate::config::types::Config;
use crate::config::{defaults, validation};
use crate::utils::error::{BoxResult, TocError};

/// Configuration file names to look for
const CONFIG_FILES: [&str; 4] = ["_config.yml", "_config.yaml", "_config.toml", "_config.json"];

/// Load site configuration from config files.
///
/// Files are merged in order, later files overriding earlier ones key by key
/// (nested tables such as `toc:` are merged, not replaced).
pub fn load_config<P: AsRef<Path>>(
    source_dir: P,
    config_files: Option<Vec<PathBuf>>,
) -> BoxResult<Config> {
    let config_paths = match config_files {
        Some(paths) if !paths.is_empty() => paths,
        _ => find_default_config_files(&source_dir),
    };

    let mut merged = Value::Object(Map::new());
    if config_paths.is_empty() {
        debug!("No configuration files found, using defaults");
    } else {
        for path in config_paths {
            debug!("Loading configuration from {}", path.display());
            let value = read_config_file(&path)?;
            merge_values(&mut merged, value);
        }
    }

    let mut config: Config = serde_json::from_value(merged)
        .map_err(|e| TocError::Config(format!("Invalid configuration: {}", e)))?;

    // Relative to the directory the site was loaded from
    if config.source == defaults::default_source() {
        config.source = source_dir.as_ref().to_path_buf();
    }

    validation::validate_config(&config)?;

    debug!("Configuration loaded: {:?}", config);
    Ok(config)
}

/// Find default configuration files
fn find_default_config_files<P: AsRef<Path>>(source_dir: P) -> Vec<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| source_dir.as_ref().join(name))
        .filter(|path| path.exists())
        .collect()
}

/// Read one configuration file into a generic value tree
fn read_config_file(config_path: &Path) -> BoxResult<Value> {
    if !config_path.exists() {
        return Err(TocError::Config(format!(
            "Configuration file not found: {}",
            config_path.display()
        ))
        .into());
    }

    let content = fs::read_to_string(config_path).map_err(|e| {
        TocError::Config(format!(
            "Failed to read configuration file {}: {}",
            config_path.display(),
            e
        ))
    })?;

    let extension = config_path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase());

    // Assume YAML if no extension
    let value = match extension.as_deref() {
        None | Some("yml") | Some("yaml") => parse_yaml_config(&content, config_path)?,
        Some("toml") => parse_toml_config(&content, config_path)?,
        Some("json") => parse_json_config(&content, config_path)?,
        Some(other) => {
            return Err(TocError::Config(format!(
                "Unsupported configuration file format: {}",
                other
            ))
            .into());
        }
    };

    Ok(value)
}

/// Parse a YAML configuration file
fn parse_yaml_config(content: &str, path: &Path) -> BoxResult<Value> {
    // An empty YAML document is a valid, empty configuration
    if content.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    serde_yaml::from_str(content).map_err(|e| {
        TocError::Config(format!(
            "Failed to parse YAML configuration ({}): {}",
            path.display(),
            e
        ))
        .into()
    })
}

/// Parse a TOML configuration file
fn parse_toml_config(content: &str, path: &Path) -> BoxResult<Value> {
    toml::from_str(content).map_err(|e| {
        TocError::Config(format!(
            "Failed to parse TOML configuration ({}): {}",
            path.display(),
            e
        ))
        .into()
    })
}

/// Parse a JSON configuration file
fn parse_json_config(content: &str, path: &Path) -> BoxResult<Value> {
    serde_json::from_str(content).map_err(|e| {
        TocError::Config(format!(
            "Failed to parse JSON configuration ({}): {}",
            path.display(),
            e
        ))
        .into()
    })
}

/// Merge `source` into `target`; objects merge recursively, anything else replaces
fn merge_values(target: &mut Value, source: Value) {
    match (target, source) {
        (Value::Object(target_map), Value::Object(source_map)) => {
            for (key, value) in source_map {
                match target_map.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        target_map.insert(key, value);
                    }
                }
            }
        }
        (_, Value::Null) => {}
        (target, source) => *target = source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{BackToTopDisplay, ListType};
    use crate::utils::fs::write_file;

    #[test]
    fn test_defaults_without_config_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path(), None).unwrap();

        assert_eq!(config.source, dir.path());
        assert_eq!(config.destination, PathBuf::from("_site"));
        assert_eq!(config.toc.minimum_headers, 3);
    }

    #[test]
    fn test_yaml_toc_section() {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            dir.path().join("_config.yml"),
            "title: My docs\ndestination: public\ntoc:\n  listType: ul\n  minimumHeaders: 2\n  backToTopDisplay: highest\n",
        )
        .unwrap();

        let config = load_config(dir.path(), None).unwrap();
        assert_eq!(config.destination, PathBuf::from("public"));
        assert_eq!(config.toc.list_type, ListType::Ul);
        assert_eq!(config.toc.minimum_headers, 2);
        assert_eq!(config.toc.back_to_top_display, BackToTopDisplay::Highest);
    }

    #[test]
    fn test_later_files_override_nested_keys() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("base.yml");
        let local = dir.path().join("local.toml");
        write_file(&base, "toc:\n  minimumHeaders: 2\n  linkHere: true\n").unwrap();
        write_file(&local, "[toc]\nminimumHeaders = 4\n").unwrap();

        let config = load_config(dir.path(), Some(vec![base, local])).unwrap();
        assert_eq!(config.toc.minimum_headers, 4);
        assert!(config.toc.link_here);
    }

    #[test]
    fn test_json_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("toc.json");
        write_file(&path, r#"{"toc": {"headers": ["h2", "h3"], "title": "<h2>Contents</h2>"}}"#).unwrap();

        let config = load_config(dir.path(), Some(vec![path])).unwrap();
        assert_eq!(config.toc.headers.to_string(), "h2, h3");
        assert_eq!(config.toc.title, "<h2>Contents</h2>");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(dir.path(), Some(vec![dir.path().join("nope.yml")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_bad_selector_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path().join("_config.yml"), "toc:\n  headers: \"h2, p\"\n").unwrap();

        let err = load_config(dir.path(), None).unwrap_err();
        assert!(err.to_string().contains("Unsupported heading selector"));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        write_file(&path, "x=1").unwrap();
        assert!(load_config(dir.path(), Some(vec![path])).is_err());
    }

    #[test]
    fn test_merge_values_replaces_scalars() {
        let mut target = serde_json::json!({"toc": {"a": 1, "b": 2}, "x": 1});
        merge_values(&mut target, serde_json::json!({"toc": {"b": 3}, "x": null}));
        assert_eq!(target, serde_json::json!({"toc": {"a": 1, "b": 3}, "x": 1}));
    }
}
