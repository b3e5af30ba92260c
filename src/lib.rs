//! Table of contents and heading anchors for rendered documentation pages.
//!
//! The crate works in two phases. [`toc::build`] plans the table of contents
//! for a list of headings without touching any document, and
//! [`html::render`] finds the headings and output containers of a rendered
//! page and writes such a plan into it. [`builder::render_site`] runs the
//! second phase over every page of a site.
//!
//! ```
//! use docs_toc::{render, TocConfig};
//!
//! let page = r#"<div class="toc"></div>
//! <h2 id="install">Install</h2>
//! <h2 id="usage">Usage</h2>
//! <h3 id="flags">Flags</h3>"#;
//!
//! let outcome = render(page, &TocConfig::default());
//! assert!(outcome.html.contains(r##"<a href="#usage">Usage</a>"##));
//! ```

pub mod builder;
pub mod cli;
pub mod config;
pub mod html;
pub mod toc;
pub mod utils;

pub use config::{Config, TocConfig};
pub use html::{render, RenderOutcome, RenderStatus};
pub use toc::{build, TocPlan};
pub use utils::{BoxResult, TocError};
