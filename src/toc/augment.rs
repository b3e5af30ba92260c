use serde::Serialize;

use crate::config::{BackToTopDisplay, TocConfig};
use crate::toc::encode::{encode_fragment, fragment_href};
use crate::toc::heading::{EligibleHeading, HeadingLevel};
use crate::toc::navigate::{force_navigate, Location};

/// Which appended control a heading carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlKind {
    LinkHere,
    BackToTop,
}

impl ControlKind {
    fn class_suffix(self) -> &'static str {
        match self {
            ControlKind::LinkHere => "link-here",
            ControlKind::BackToTop => "back-to-top",
        }
    }
}

/// An anchor appended after a heading's wrapped content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnchorControl {
    pub kind: ControlKind,
    /// `#` plus the encoded target identifier
    pub href: String,
    pub title: String,
    /// Label markup, placed inside the icon span as is
    pub text: String,
    pub class: String,
    pub icon_class: String,
}

impl AnchorControl {
    fn new(
        kind: ControlKind,
        target: &str,
        title: &str,
        text: &str,
        icon: &str,
        config: &TocConfig,
    ) -> Self {
        let mut icon_class = config.class_name("icon");
        if !icon.trim().is_empty() {
            icon_class.push(' ');
            icon_class.push_str(icon.trim());
        }

        Self {
            kind,
            href: fragment_href(target),
            title: title.to_string(),
            text: text.to_string(),
            class: format!(
                "{} {}",
                config.class_name("anchor"),
                config.class_name(kind.class_suffix())
            ),
            icon_class,
        }
    }

    /// Encoded fragment this control navigates to
    pub fn fragment(&self) -> &str {
        self.href.strip_prefix('#').unwrap_or(self.href.as_str())
    }

    /// Follow the control the way a click would
    pub fn activate<L: Location + ?Sized>(&self, location: &mut L) {
        force_navigate(location, self.fragment());
    }

    pub fn to_html(&self) -> String {
        format!(
            "<a href=\"{}\" title=\"{}\" class=\"{}\"><span class=\"{}\">{}</span></a>",
            self.href,
            html_escape::encode_double_quoted_attribute(&self.title),
            self.class,
            html_escape::encode_double_quoted_attribute(&self.icon_class),
            self.text
        )
    }
}

/// Click handler registered on a heading's wrapped content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClickHandler {
    /// Encoded heading identifier
    pub fragment: String,
}

impl ClickHandler {
    pub fn fire<L: Location + ?Sized>(&self, location: &mut L) {
        force_navigate(location, &self.fragment);
    }
}

/// Everything the application phase does to one eligible heading
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingAugmentation {
    /// Position of the heading in the builder's input
    pub index: usize,
    pub level: HeadingLevel,
    pub identifier: String,
    /// Identifier derived from the preceding sibling; must be written to the heading
    pub assign_identifier: bool,
    pub is_highest_level: bool,
    /// Classes added to the heading element
    pub classes: Vec<String>,
    /// Class of the span wrapping the heading content
    pub wrapper_class: String,
    /// Anchors appended after the wrapper, in order
    pub controls: Vec<AnchorControl>,
    pub click_handler: Option<ClickHandler>,
}

impl HeadingAugmentation {
    /// Work out the augmentation of `heading`, `highest` being the smallest
    /// level among all eligible headings of the run
    pub fn plan(heading: &EligibleHeading<'_>, highest: HeadingLevel, config: &TocConfig) -> Self {
        let is_highest_level = heading.level == highest;
        let mut classes = vec![config.class_name("top-level-header")];
        let mut controls = Vec::new();

        if config.link_here {
            controls.push(AnchorControl::new(
                ControlKind::LinkHere,
                &heading.identifier,
                &config.link_here_title,
                &config.link_here_text,
                &config.link_here_icon,
                config,
            ));
        }

        let show_back_to_top = match config.back_to_top_display {
            BackToTopDisplay::Always => true,
            BackToTopDisplay::Highest => is_highest_level,
        };
        if config.back_to_top && show_back_to_top {
            controls.push(AnchorControl::new(
                ControlKind::BackToTop,
                &config.back_to_top_id,
                &config.back_to_top_title,
                &config.back_to_top_text,
                &config.back_to_top_icon,
                config,
            ));
        }

        let click_handler = if config.link_header {
            classes.push(config.class_name("header"));
            Some(ClickHandler {
                fragment: encode_fragment(&heading.identifier),
            })
        } else {
            None
        };

        Self {
            index: heading.index,
            level: heading.level,
            identifier: heading.identifier.clone(),
            assign_identifier: heading.derived,
            is_highest_level,
            classes,
            wrapper_class: config.class_name("wrapper"),
            controls,
            click_handler,
        }
    }

    pub fn control(&self, kind: ControlKind) -> Option<&AnchorControl> {
        self.controls.iter().find(|control| control.kind == kind)
    }

    /// Click the wrapped heading content; `false` when no handler is registered
    pub fn click<L: Location + ?Sized>(&self, location: &mut L) -> bool {
        match &self.click_handler {
            Some(handler) => {
                handler.fire(location);
                true
            }
            None => false,
        }
    }

    /// Markup appended after the wrapper span
    pub fn controls_html(&self) -> String {
        self.controls.iter().map(AnchorControl::to_html).collect()
    }
}
