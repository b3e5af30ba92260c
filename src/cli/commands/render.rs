use log::{error, info};
use std::path::PathBuf;

use crate::builder::{render_site, OutputMode};
use crate::cli::commands::load;
use crate::utils::error::{BoxResult, TocError};

/// Handle the render command
pub fn handle_render_command(
    source: Option<&PathBuf>,
    config_files: Option<&Vec<PathBuf>>,
    destination: Option<&PathBuf>,
    in_place: bool,
) -> BoxResult<()> {
    let mut config = load(source, config_files)?;
    if let Some(destination) = destination {
        config.destination = destination.clone();
    }

    let mode = if in_place {
        OutputMode::InPlace
    } else {
        OutputMode::Destination
    };

    info!("Rendering tables of contents...");
    let report = render_site(&config, mode)?;

    if report.failed > 0 {
        error!("{} page(s) could not be processed", report.failed);
        return Err(TocError::Generic(format!("{} page(s) failed", report.failed)).into());
    }

    info!("Done: {} of {} page(s) received a table of contents", report.rendered, report.processed());
    Ok(())
}
