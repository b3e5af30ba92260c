//! Batch processing of a rendered site.

pub mod site;

pub use site::{render_page, render_site, OutputMode, PageStatus, SiteReport};
