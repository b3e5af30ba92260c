use serde_yaml::Value;
use std::path::PathBuf;

use crate::cli::commands::load;
use crate::cli::types::ConfigAction;
use crate::config::Config;
use crate::utils::error::{BoxResult, TocError};

/// Handle the config command
pub fn handle_config_command(
    source: Option<&PathBuf>,
    config_files: Option<&Vec<PathBuf>>,
    action: &ConfigAction,
) -> BoxResult<()> {
    let cfg = load(source, config_files)?;
    println!("{}", format_config(&cfg, action)?);
    Ok(())
}

/// YAML text of the whole configuration or of one dotted key
fn format_config(cfg: &Config, action: &ConfigAction) -> BoxResult<String> {
    let yaml = serde_yaml::to_value(cfg)
        .map_err(|e| TocError::Config(format!("Failed to serialize configuration: {}", e)))?;

    let value = match action {
        ConfigAction::Get { key } => get_nested_value(&yaml, key)
            .ok_or_else(|| TocError::Config(format!("Key not found: {}", key)))?,
        ConfigAction::List {} => &yaml,
    };

    let output = serde_yaml::to_string(value)
        .map_err(|e| TocError::Config(format!("Failed to serialize configuration: {}", e)))?;
    Ok(output.trim_end().to_string())
}

fn get_nested_value<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    let mut current = value;
    for part in key.split('.') {
        match current {
            Value::Mapping(map) => {
                let part_key = Value::String(part.to_string());
                current = map.get(&part_key)?;
            }
            _ => return None,
        }
    }
    Some(current)
}
