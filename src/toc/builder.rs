use log::debug;
use serde::Serialize;

use crate::config::TocConfig;
use crate::toc::augment::HeadingAugmentation;
use crate::toc::heading::{select_eligible, HeadingNode};
use crate::toc::outline::{Outline, OutlineEntry};

/// Result of a run that produced an outline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocPlan {
    /// Markup for the output container, replacing its content
    pub markup: String,
    pub outline: Outline,
    /// One entry per eligible heading, in document order
    pub augmentations: Vec<HeadingAugmentation>,
}

/// Builds the table of contents for one document.
///
/// The builder is pure: it reads the headings and the configuration and
/// describes the outcome. Applying that outcome to a page is left to the
/// caller (see [`crate::html::render`]).
#[derive(Debug, Clone, Copy)]
pub struct TocBuilder<'c> {
    config: &'c TocConfig,
}

impl<'c> TocBuilder<'c> {
    pub fn new(config: &'c TocConfig) -> Self {
        Self { config }
    }

    /// Build the plan, or `None` when the run must leave the document alone
    /// (no eligible heading, or fewer than `minimumHeaders`).
    pub fn build(&self, headings: &[HeadingNode]) -> Option<TocPlan> {
        let config = self.config;
        let eligible = select_eligible(headings, &config.headers);

        if eligible.is_empty() || eligible.len() < config.minimum_headers {
            debug!(
                "Skipping TOC: {} eligible heading(s), {} required",
                eligible.len(),
                config.minimum_headers
            );
            return None;
        }

        let highest = eligible.iter().map(|heading| heading.level).min()?;

        let outline = Outline::build(
            eligible.iter().map(|heading| {
                OutlineEntry::new(heading.level, heading.identifier.as_str(), heading.content)
            }),
            config.level_jumps,
        );
        let markup = outline.to_html(&config.title, config.list_type, &config.class_name(""));

        let augmentations = eligible
            .iter()
            .map(|heading| HeadingAugmentation::plan(heading, highest, config))
            .collect();

        Some(TocPlan {
            markup,
            outline,
            augmentations,
        })
    }
}

/// Build the table of contents of `headings` with `config`
pub fn build(headings: &[HeadingNode], config: &TocConfig) -> Option<TocPlan> {
    TocBuilder::new(config).build(headings)
}
