use log::warn;
use std::path::PathBuf;

use crate::cli::commands::load;
use crate::cli::types::OutlineFormat;
use crate::html::Document;
use crate::toc::build;
use crate::utils::error::{BoxResult, TocError};
use crate::utils::fs::read_file;

/// Handle the outline command: print the table of contents of one page
pub fn handle_outline_command(
    source: Option<&PathBuf>,
    config_files: Option<&Vec<PathBuf>>,
    file: &PathBuf,
    format: OutlineFormat,
) -> BoxResult<()> {
    let config = load(source, config_files)?;
    let page = read_file(file)?;
    let document = Document::parse(&page);

    let Some(plan) = build(&document.heading_nodes(), &config.toc) else {
        warn!(
            "{} has fewer than {} eligible heading(s), no table of contents",
            file.display(),
            config.toc.minimum_headers
        );
        return Ok(());
    };

    let output = match format {
        OutlineFormat::Html => plan.markup,
        OutlineFormat::Markdown => plan.outline.to_markdown(),
        OutlineFormat::Json => serde_json::to_string_pretty(&plan)
            .map_err(|e| TocError::Generic(format!("Failed to serialize outline: {}", e)))?,
    };
    println!("{}", output);
    Ok(())
}
