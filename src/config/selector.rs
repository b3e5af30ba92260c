use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::toc::HeadingLevel;
use crate::utils::error::TocError;

/// The set of heading tags that take part in outline generation.
///
/// Written as a comma separated tag selector (`"h2, h3, h4"`) or as a list
/// of tag names. Only `h1`..`h6` tag selectors are understood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SelectorInput", into = "String")]
pub struct HeaderSelector {
    levels: BTreeSet<HeadingLevel>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SelectorInput {
    Joined(String),
    List(Vec<String>),
}

impl HeaderSelector {
    /// Every heading level, `h1` through `h6`
    pub fn all() -> Self {
        Self::range(HeadingLevel::MIN, HeadingLevel::MAX)
    }

    /// The inclusive range `from..=to` of heading levels
    pub fn range(from: u8, to: u8) -> Self {
        let levels = (from..=to).filter_map(HeadingLevel::new).collect();
        Self { levels }
    }

    /// Parse a comma separated tag selector such as `"h2, h3"`
    pub fn parse(selector: &str) -> Result<Self, TocError> {
        Self::from_parts(selector.split(','))
    }

    fn from_parts<'a, I>(parts: I) -> Result<Self, TocError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut levels = BTreeSet::new();
        for part in parts {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let level = HeadingLevel::from_tag_name(part).ok_or_else(|| {
                TocError::Config(format!(
                    "Unsupported heading selector '{}' (expected h1 to h6)",
                    part
                ))
            })?;
            levels.insert(level);
        }

        if levels.is_empty() {
            return Err(TocError::Config("Heading selector matches no headings".to_string()));
        }

        Ok(Self { levels })
    }

    /// Whether headings of this level are visible to the builder
    pub fn contains(&self, level: HeadingLevel) -> bool {
        self.levels.contains(&level)
    }

    pub fn levels(&self) -> impl Iterator<Item = HeadingLevel> + '_ {
        self.levels.iter().copied()
    }
}

impl Default for HeaderSelector {
    fn default() -> Self {
        Self::all()
    }
}

impl TryFrom<SelectorInput> for HeaderSelector {
    type Error = TocError;

    fn try_from(input: SelectorInput) -> Result<Self, Self::Error> {
        match input {
            SelectorInput::Joined(selector) => Self::parse(&selector),
            SelectorInput::List(parts) => Self::from_parts(parts.iter().map(String::as_str)),
        }
    }
}

impl fmt::Display for HeaderSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tags: Vec<String> = self.levels.iter().map(|level| level.tag_name()).collect();
        write!(f, "{}", tags.join(", "))
    }
}

impl From<HeaderSelector> for String {
    fn from(selector: HeaderSelector) -> Self {
        selector.to_string()
    }
}

/// Selector for the element(s) that receive the generated outline.
///
/// Supports the three simple forms used on documentation pages: `.class`,
/// `#id` and a bare tag name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ContainerSelector {
    Class(String),
    Id(String),
    Tag(String),
}

impl ContainerSelector {
    pub fn parse(selector: &str) -> Result<Self, TocError> {
        let selector = selector.trim();
        let invalid = || TocError::Config(format!("Unsupported container selector '{}'", selector));

        let (parsed, name) = if let Some(class) = selector.strip_prefix('.') {
            (ContainerSelector::Class(class.to_string()), class)
        } else if let Some(id) = selector.strip_prefix('#') {
            (ContainerSelector::Id(id.to_string()), id)
        } else {
            (ContainerSelector::Tag(selector.to_ascii_lowercase()), selector)
        };

        let valid_name = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ':');
        if !valid_name {
            return Err(invalid());
        }

        Ok(parsed)
    }
}

impl Default for ContainerSelector {
    fn default() -> Self {
        ContainerSelector::Class("toc".to_string())
    }
}

impl TryFrom<String> for ContainerSelector {
    type Error = TocError;

    fn try_from(selector: String) -> Result<Self, Self::Error> {
        Self::parse(&selector)
    }
}

impl fmt::Display for ContainerSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerSelector::Class(class) => write!(f, ".{}", class),
            ContainerSelector::Id(id) => write!(f, "#{}", id),
            ContainerSelector::Tag(tag) => write!(f, "{}", tag),
        }
    }
}

impl From<ContainerSelector> for String {
    fn from(selector: ContainerSelector) -> Self {
        selector.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(n: u8) -> HeadingLevel {
        HeadingLevel::new(n).unwrap()
    }

    #[test]
    fn test_parse_joined_selector() {
        let selector = HeaderSelector::parse("h2, H3,h4").unwrap();
        assert!(!selector.contains(level(1)));
        assert!(selector.contains(level(2)));
        assert!(selector.contains(level(3)));
        assert!(selector.contains(level(4)));
        assert!(!selector.contains(level(5)));
        assert_eq!(selector.to_string(), "h2, h3, h4");
    }

    #[test]
    fn test_parse_rejects_unknown_tags() {
        assert!(HeaderSelector::parse("h2, p").is_err());
        assert!(HeaderSelector::parse("h7").is_err());
        assert!(HeaderSelector::parse(" , ").is_err());
    }

    #[test]
    fn test_deserialize_string_or_list() {
        let from_str: HeaderSelector = serde_yaml::from_str("\"h2, h3\"").unwrap();
        let from_list: HeaderSelector = serde_yaml::from_str("[h2, h3]").unwrap();
        assert_eq!(from_str, from_list);
        assert_eq!(from_str, HeaderSelector::range(2, 3));
    }

    #[test]
    fn test_default_covers_all_levels() {
        assert_eq!(HeaderSelector::default().levels().count(), 6);
    }

    #[test]
    fn test_container_selector_forms() {
        assert_eq!(
            ContainerSelector::parse(".toc").unwrap(),
            ContainerSelector::Class("toc".to_string())
        );
        assert_eq!(
            ContainerSelector::parse("#page-toc").unwrap(),
            ContainerSelector::Id("page-toc".to_string())
        );
        assert_eq!(
            ContainerSelector::parse("NAV").unwrap(),
            ContainerSelector::Tag("nav".to_string())
        );
        assert!(ContainerSelector::parse(".").is_err());
        assert!(ContainerSelector::parse("div.toc").is_err());
        assert_eq!(ContainerSelector::default().to_string(), ".toc");
    }
}
