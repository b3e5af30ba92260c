mod config;
mod outline;
mod render;

pub use config::handle_config_command;
pub use outline::handle_outline_command;
pub use render::handle_render_command;

use std::path::{Path, PathBuf};

use log::debug;

use crate::config::{self as site_config, Config};
use crate::utils::error::BoxResult;

/// Load the site configuration, honouring the global `--source` and `--config` flags
pub(crate) fn load(source: Option<&PathBuf>, config_files: Option<&Vec<PathBuf>>) -> BoxResult<Config> {
    let source_dir = source.map_or_else(|| Path::new("."), |p| p.as_path());
    let mut config = site_config::load_config(source_dir, config_files.cloned())?;

    if let Some(source) = source {
        config.source = source.clone();
    }
    debug!("Effective source directory: {}", config.source.display());
    Ok(config)
}
