//! Table of contents generation.
//!
//! [`build`] turns the headings of a document into a [`TocPlan`]: the outline
//! markup for the output container plus one [`HeadingAugmentation`] per
//! heading that takes part. Nothing here touches a document; see
//! [`crate::html`] for applying a plan to a rendered page.

mod augment;
mod builder;
mod encode;
mod heading;
pub mod navigate;
mod outline;

pub use augment::{AnchorControl, ClickHandler, ControlKind, HeadingAugmentation};
pub use builder::{build, TocBuilder, TocPlan};
pub use encode::{encode_fragment, fragment_href};
pub use heading::{select_eligible, EligibleHeading, HeadingLevel, HeadingNode};
pub use outline::{Outline, OutlineEntry, OutlineItem};
