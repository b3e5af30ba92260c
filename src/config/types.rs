use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::defaults;
use crate::config::selector::{ContainerSelector, HeaderSelector};

/// List semantics of the generated outline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    #[default]
    #[serde(alias = "ordered")]
    Ol,
    #[serde(alias = "unordered")]
    Ul,
}

impl ListType {
    pub fn tag_name(self) -> &'static str {
        match self {
            ListType::Ol => "ol",
            ListType::Ul => "ul",
        }
    }
}

/// Which headings receive a "back to top" control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackToTopDisplay {
    /// Every eligible heading
    #[default]
    Always,
    /// Only headings at the shallowest level present on the page
    Highest,
}

/// How irregular heading level jumps (e.g. h2 followed by h5) are nested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelJumps {
    /// Nest by the raw level difference, opening one list per skipped level
    #[default]
    Preserve,
    /// Nest under the nearest shallower heading, one list per step
    Normalize,
}

/// Options for one table of contents run.
///
/// Field names are camelCase (`minimumHeaders`, `backToTopDisplay`, ...);
/// snake_case spellings are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TocConfig {
    /// Markup placed before the generated list
    pub title: String,

    /// Fewer eligible headings than this and the page is left untouched
    #[serde(alias = "minimum_headers")]
    pub minimum_headers: usize,

    /// Heading tags considered for the outline
    pub headers: HeaderSelector,

    #[serde(alias = "list_type")]
    pub list_type: ListType,

    /// Clicking a heading's text navigates to that heading
    #[serde(alias = "link_header")]
    pub link_header: bool,

    #[serde(alias = "link_here")]
    pub link_here: bool,

    #[serde(alias = "link_here_text")]
    pub link_here_text: String,

    #[serde(alias = "link_here_title")]
    pub link_here_title: String,

    /// Extra classes for the "link here" icon span, e.g. an icon font's `icon icon-link`
    #[serde(alias = "link_here_icon")]
    pub link_here_icon: String,

    #[serde(alias = "back_to_top")]
    pub back_to_top: bool,

    /// Identifier the "back to top" control points at
    #[serde(alias = "back_to_top_id")]
    pub back_to_top_id: String,

    #[serde(alias = "back_to_top_text")]
    pub back_to_top_text: String,

    #[serde(alias = "back_to_top_title")]
    pub back_to_top_title: String,

    /// Extra classes for the "back to top" icon span
    #[serde(alias = "back_to_top_icon")]
    pub back_to_top_icon: String,

    #[serde(alias = "back_to_top_display")]
    pub back_to_top_display: BackToTopDisplay,

    /// Element(s) whose content is replaced by the outline
    pub container: ContainerSelector,

    /// Prefix for every class the builder adds
    #[serde(alias = "class_prefix")]
    pub class_prefix: String,

    #[serde(alias = "level_jumps")]
    pub level_jumps: LevelJumps,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            minimum_headers: 3,
            headers: HeaderSelector::all(),
            list_type: ListType::Ol,
            link_header: true,
            link_here: false,
            link_here_text: String::new(),
            link_here_title: "Link here".to_string(),
            link_here_icon: String::new(),
            back_to_top: false,
            back_to_top_id: String::new(),
            back_to_top_text: String::new(),
            back_to_top_title: "Back to top".to_string(),
            back_to_top_icon: String::new(),
            back_to_top_display: BackToTopDisplay::Always,
            container: ContainerSelector::default(),
            class_prefix: defaults::default_class_prefix(),
            level_jumps: LevelJumps::Preserve,
        }
    }
}

impl TocConfig {
    /// The options the documentation site itself runs with: h2-h6 only,
    /// "link here" anchors and "back to top" links pointing at the TOC, both
    /// drawn with the site's icon font.
    pub fn site_defaults() -> Self {
        Self {
            minimum_headers: 2,
            headers: HeaderSelector::range(2, 6),
            link_here: true,
            back_to_top: true,
            back_to_top_id: "toc".to_string(),
            back_to_top_title: "Back to Table of Contents".to_string(),
            link_here_icon: "icon icon-link".to_string(),
            back_to_top_icon: "icon icon-chevron-up".to_string(),
            ..Self::default()
        }
    }

    /// Class name derived from the configured prefix (`suffix` empty gives the prefix itself)
    pub fn class_name(&self, suffix: &str) -> String {
        if suffix.is_empty() {
            self.class_prefix.clone()
        } else {
            format!("{}-{}", self.class_prefix, suffix)
        }
    }
}

/// Site configuration: where rendered pages live and how their TOC is built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the rendered pages
    #[serde(default = "defaults::default_source")]
    pub source: PathBuf,

    /// Directory the processed pages are written to
    #[serde(default = "defaults::default_destination")]
    pub destination: PathBuf,

    /// Glob patterns, relative to the source directory, of pages to leave alone
    #[serde(default = "defaults::default_exclude")]
    pub exclude: Vec<String>,

    /// File extensions treated as rendered pages
    #[serde(default = "defaults::default_extensions")]
    pub extensions: Vec<String>,

    /// Table of contents options
    #[serde(default)]
    pub toc: TocConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: defaults::default_source(),
            destination: defaults::default_destination(),
            exclude: defaults::default_exclude(),
            extensions: defaults::default_extensions(),
            toc: TocConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toc_defaults() {
        let config = TocConfig::default();
        assert_eq!(config.minimum_headers, 3);
        assert_eq!(config.list_type, ListType::Ol);
        assert!(config.link_header);
        assert!(!config.link_here);
        assert_eq!(config.link_here_title, "Link here");
        assert_eq!(config.back_to_top_title, "Back to top");
        assert_eq!(config.back_to_top_display, BackToTopDisplay::Always);
        assert_eq!(config.class_name("wrapper"), "jekyll-toc-wrapper");
        assert_eq!(config.class_name(""), "jekyll-toc");
    }

    #[test]
    fn test_camel_case_option_names() {
        let yaml = r#"
minimumHeaders: 2
headers: "h2, h3, h4, h5, h6"
listType: ul
linkHere: true
backToTop: true
backToTopId: toc
backToTopDisplay: highest
"#;
        let config: TocConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.minimum_headers, 2);
        assert_eq!(config.headers, HeaderSelector::range(2, 6));
        assert_eq!(config.list_type, ListType::Ul);
        assert!(config.link_here);
        assert_eq!(config.back_to_top_id, "toc");
        assert_eq!(config.back_to_top_display, BackToTopDisplay::Highest);
        // untouched options keep their defaults
        assert!(config.link_header);
        assert_eq!(config.link_here_title, "Link here");
    }

    #[test]
    fn test_snake_case_aliases() {
        let config: TocConfig =
            serde_json::from_str(r#"{"minimum_headers": 5, "level_jumps": "normalize"}"#).unwrap();
        assert_eq!(config.minimum_headers, 5);
        assert_eq!(config.level_jumps, LevelJumps::Normalize);
    }

    #[test]
    fn test_unknown_display_is_rejected() {
        let result: Result<TocConfig, _> = serde_yaml::from_str("backToTopDisplay: sometimes");
        assert!(result.is_err());
    }

    #[test]
    fn test_site_defaults() {
        let config = TocConfig::site_defaults();
        assert_eq!(config.minimum_headers, 2);
        assert_eq!(config.headers.to_string(), "h2, h3, h4, h5, h6");
        assert!(config.link_here && config.back_to_top);
        assert_eq!(config.back_to_top_id, "toc");
        assert_eq!(config.back_to_top_title, "Back to Table of Contents");
        assert_eq!(config.link_here_icon, "icon icon-link");
        assert_eq!(config.back_to_top_icon, "icon icon-chevron-up");
    }
}
