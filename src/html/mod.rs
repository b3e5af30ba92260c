//! Rendered pages: finding headings and output containers, and writing a
//! table of contents plan back into the markup.
//!
//! Scanning is regex based and expects reasonably well-formed markup, the
//! kind a static site generator emits.

mod attributes;
mod document;
mod render;

pub use attributes::Attributes;
pub use document::{ContainerElement, Document, HeadingElement};
pub use render::{render, RenderOutcome, RenderStatus, SkipReason, NAVIGATE_ATTRIBUTE};
