mod renderer;

pub use renderer::{render_page, render_site, OutputMode, PageStatus, SiteReport};
