use std::path::{Path, PathBuf};
use std::time::Instant;

use glob::Pattern;
use log::{debug, error, info};
use rayon::prelude::*;

use crate::config::{Config, TocConfig};
use crate::html::{render, RenderStatus, SkipReason};
use crate::utils::error::{BoxResult, TocError};
use crate::utils::fs::{list_files_with_extensions, read_file, write_file};
use crate::utils::path::rebase;

/// Where processed pages are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Mirror the source tree under the destination directory
    Destination,
    /// Overwrite pages that received a table of contents
    InPlace,
}

/// What happened to one page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    Rendered,
    Skipped(SkipReason),
}

/// Totals of one site run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteReport {
    pub rendered: usize,
    pub skipped: usize,
    pub excluded: usize,
    pub failed: usize,
}

impl SiteReport {
    pub fn processed(&self) -> usize {
        self.rendered + self.skipped
    }
}

/// Run the table of contents over every page of the site
pub fn render_site(config: &Config, mode: OutputMode) -> BoxResult<SiteReport> {
    let start = Instant::now();
    let source = config.source.as_path();
    let destination = resolve_destination(config);

    info!("Using source directory: {}", source.display());
    if mode == OutputMode::Destination {
        info!("Output will be generated in: {}", destination.display());
    }

    let extensions: Vec<&str> = config.extensions.iter().map(String::as_str).collect();
    let patterns = compile_patterns(&config.exclude)?;

    let mut report = SiteReport::default();
    let mut pages = Vec::new();
    for path in list_files_with_extensions(source, &extensions)? {
        if path.starts_with(&destination) || is_excluded(&path, source, &patterns) {
            debug!("Excluding {}", path.display());
            report.excluded += 1;
        } else {
            pages.push(path);
        }
    }

    info!("Processing {} page(s)...", pages.len());
    let results: Vec<(PathBuf, Result<PageStatus, TocError>)> = pages
        .par_iter()
        .map(|path| {
            let output = match mode {
                OutputMode::Destination => Some(rebase(path, source, &destination)),
                OutputMode::InPlace => None,
            };
            (path.clone(), render_page(path, output.as_deref(), &config.toc))
        })
        .collect();

    for (path, result) in results {
        match result {
            Ok(PageStatus::Rendered) => report.rendered += 1,
            Ok(PageStatus::Skipped(reason)) => {
                debug!("Skipped {}: {:?}", path.display(), reason);
                report.skipped += 1;
            }
            Err(e) => {
                error!("Failed to process {}: {}", path.display(), e);
                report.failed += 1;
            }
        }
    }

    info!("Site processed in {:.2?}", start.elapsed());
    info!(
        "Pages with TOC: {}, Unchanged: {}, Excluded: {}, Errors: {}",
        report.rendered, report.skipped, report.excluded, report.failed
    );
    Ok(report)
}

/// Render one page; `output` is `None` to rewrite the page in place
pub fn render_page(
    path: &Path,
    output: Option<&Path>,
    toc: &TocConfig,
) -> Result<PageStatus, TocError> {
    let source = read_file(path)
        .map_err(|e| TocError::Generic(format!("reading {}: {}", path.display(), e)))?;
    let outcome = render(&source, toc);

    let status = match outcome.status {
        RenderStatus::Rendered { .. } => PageStatus::Rendered,
        RenderStatus::Skipped(reason) => PageStatus::Skipped(reason),
    };

    let target = match output {
        Some(target) => Some(target),
        None if status == PageStatus::Rendered => Some(path),
        None => None,
    };
    if let Some(target) = target {
        write_file(target, &outcome.html)
            .map_err(|e| TocError::Generic(format!("writing {}: {}", target.display(), e)))?;
    }

    Ok(status)
}

fn resolve_destination(config: &Config) -> PathBuf {
    if config.destination.is_absolute() {
        config.destination.clone()
    } else {
        config.source.join(&config.destination)
    }
}

fn compile_patterns(exclude: &[String]) -> BoxResult<Vec<Pattern>> {
    let mut patterns = Vec::with_capacity(exclude.len());
    for pattern in exclude {
        let compiled = Pattern::new(pattern).map_err(|e| {
            TocError::Config(format!("Invalid exclude pattern '{}': {}", pattern, e))
        })?;
        patterns.push(compiled);
    }
    Ok(patterns)
}

fn is_excluded(path: &Path, source: &Path, patterns: &[Pattern]) -> bool {
    let relative = path.strip_prefix(source).unwrap_or(path);
    patterns.iter().any(|pattern| pattern.matches_path(relative))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "<div class=\"toc\"></div><h2 id=\"a\">A</h2><h2 id=\"b\">B</h2><h3 id=\"c\">C</h3>";
    const SHORT_PAGE: &str = "<div class=\"toc\"></div><h2 id=\"a\">A</h2>";

    fn site() -> (tempfile::TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path().join("index.html"), PAGE).unwrap();
        write_file(dir.path().join("guide/short.html"), SHORT_PAGE).unwrap();
        write_file(dir.path().join("vendor/lib.html"), PAGE).unwrap();
        write_file(dir.path().join("notes.txt"), PAGE).unwrap();

        let config = Config {
            source: dir.path().to_path_buf(),
            ..Config::default()
        };
        (dir, config)
    }

    #[test]
    fn test_render_into_destination() {
        let (dir, config) = site();
        let report = render_site(&config, OutputMode::Destination).unwrap();

        assert_eq!(
            report,
            SiteReport {
                rendered: 1,
                skipped: 1,
                excluded: 1,
                failed: 0
            }
        );
        assert_eq!(report.processed(), 2);

        let out = read_file(dir.path().join("_site/index.html")).unwrap();
        assert!(out.contains("<ol class=\"jekyll-toc\">"));
        // unchanged pages are still copied
        assert_eq!(read_file(dir.path().join("_site/guide/short.html")).unwrap(), SHORT_PAGE);
        assert!(!dir.path().join("_site/vendor/lib.html").exists());
        // sources stay as they were
        assert_eq!(read_file(dir.path().join("index.html")).unwrap(), PAGE);
    }

    #[test]
    fn test_second_run_ignores_destination() {
        let (_dir, config) = site();
        render_site(&config, OutputMode::Destination).unwrap();
        let report = render_site(&config, OutputMode::Destination).unwrap();
        assert_eq!(report.rendered, 1);
        assert_eq!(report.excluded, 3);
    }

    #[test]
    fn test_render_in_place() {
        let (dir, config) = site();
        let report = render_site(&config, OutputMode::InPlace).unwrap();

        assert_eq!(report.rendered, 1);
        assert!(read_file(dir.path().join("index.html"))
            .unwrap()
            .contains("jekyll-toc-wrapper"));
        assert_eq!(read_file(dir.path().join("guide/short.html")).unwrap(), SHORT_PAGE);
        assert!(!dir.path().join("_site").exists());
    }

    #[test]
    fn test_in_place_run_can_be_repeated() {
        let (dir, config) = site();
        render_site(&config, OutputMode::InPlace).unwrap();
        let first = read_file(dir.path().join("index.html")).unwrap();

        let report = render_site(&config, OutputMode::InPlace).unwrap();
        assert_eq!(report.rendered, 0);
        assert_eq!(report.skipped, 2);
        assert_eq!(read_file(dir.path().join("index.html")).unwrap(), first);

        let status = render_page(&dir.path().join("index.html"), None, &config.toc).unwrap();
        assert_eq!(status, PageStatus::Skipped(SkipReason::AlreadyProcessed));
    }

    #[test]
    fn test_render_page_reports_missing_file() {
        let result = render_page(Path::new("/no/such/page.html"), None, &TocConfig::default());
        assert!(result.is_err());
    }
}
