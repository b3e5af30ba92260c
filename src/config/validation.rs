use glob::Pattern;
use log::{info, warn};

use crate::config::types::{Config, TocConfig};
use crate::utils::error::{BoxResult, TocError};

/// Validate the configuration
pub fn validate_config(config: &Config) -> BoxResult<()> {
    validate_source_directory(config)?;
    validate_exclude_patterns(config)?;
    validate_extensions(config)?;
    validate_toc_config(&config.toc)?;

    Ok(())
}

/// Validate the source directory
fn validate_source_directory(config: &Config) -> BoxResult<()> {
    let source = &config.source;

    if !source.exists() {
        return Err(TocError::Config(format!(
            "Source directory does not exist: {}",
            source.display()
        ))
        .into());
    }

    if !source.is_dir() {
        return Err(TocError::Config(format!(
            "Source path is not a directory: {}",
            source.display()
        ))
        .into());
    }

    info!("Source directory: {}", source.display());
    Ok(())
}

/// Every exclude entry must be a valid glob pattern
fn validate_exclude_patterns(config: &Config) -> BoxResult<()> {
    for pattern in &config.exclude {
        if let Err(e) = Pattern::new(pattern) {
            return Err(TocError::Config(format!(
                "Invalid exclude pattern '{}': {}",
                pattern, e
            ))
            .into());
        }
    }

    Ok(())
}

fn validate_extensions(config: &Config) -> BoxResult<()> {
    if config.extensions.iter().all(|ext| ext.trim().is_empty()) {
        return Err(TocError::Config("No page extensions configured".to_string()).into());
    }

    Ok(())
}

/// Validate the table of contents options.
///
/// Only options that would produce broken markup are rejected; odd but
/// renderable values are accepted with a warning.
pub fn validate_toc_config(toc: &TocConfig) -> BoxResult<()> {
    let prefix = &toc.class_prefix;
    let valid_prefix = !prefix.is_empty()
        && prefix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid_prefix {
        return Err(TocError::Config(format!("Invalid class prefix '{}'", prefix)).into());
    }

    if toc.back_to_top && toc.back_to_top_id.is_empty() {
        warn!("backToTop is enabled without backToTopId; links will point at the page top");
    }

    if toc.minimum_headers == 0 {
        warn!("minimumHeaders is 0; any page with at least one heading gets an outline");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_in(dir: &std::path::Path) -> Config {
        Config {
            source: dir.to_path_buf(),
            ..Config::default()
        }
    }

    #[test]
    fn test_valid_config() {
        let dir = tempfile::tempdir().unwrap();
        assert!(validate_config(&config_in(dir.path())).is_ok());
    }

    #[test]
    fn test_missing_source_rejected() {
        let config = Config {
            source: "/no/such/source/dir".into(),
            ..Config::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_bad_exclude_pattern_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.exclude.push("[unclosed".to_string());
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_class_prefix_rules() {
        let mut toc = TocConfig::default();
        toc.class_prefix = "my toc".to_string();
        assert!(validate_toc_config(&toc).is_err());

        toc.class_prefix = String::new();
        assert!(validate_toc_config(&toc).is_err());

        toc.class_prefix = "docs_toc-2".to_string();
        assert!(validate_toc_config(&toc).is_ok());
    }

    #[test]
    fn test_back_to_top_without_target_is_accepted() {
        let toc = TocConfig {
            back_to_top: true,
            ..TocConfig::default()
        };
        assert!(validate_toc_config(&toc).is_ok());
    }
}
