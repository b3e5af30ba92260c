use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::HeaderSelector;

/// Heading level, `1` for `h1` through `6` for `h6`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;

    pub fn new(level: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&level).then_some(Self(level))
    }

    /// Level from a tag name such as `h2` or `H2`
    pub fn from_tag_name(tag: &str) -> Option<Self> {
        let digits = tag.strip_prefix('h').or_else(|| tag.strip_prefix('H'))?;
        if digits.len() != 1 {
            return None;
        }
        digits.parse().ok().and_then(Self::new)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn tag_name(self) -> String {
        format!("h{}", self.0)
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level).ok_or_else(|| format!("heading level {} is outside 1..=6", level))
    }
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> Self {
        level.0
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "h{}", self.0)
    }
}

/// One heading element of a document, in document order.
///
/// `content` is the heading's inner markup; it is carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingNode {
    pub level: HeadingLevel,
    pub identifier: Option<String>,
    /// `name` attribute of the element immediately preceding the heading
    pub sibling_name: Option<String>,
    pub content: String,
}

impl HeadingNode {
    pub fn new(level: HeadingLevel, content: impl Into<String>) -> Self {
        Self {
            level,
            identifier: None,
            sibling_name: None,
            content: content.into(),
        }
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn with_sibling_name(mut self, name: impl Into<String>) -> Self {
        self.sibling_name = Some(name.into());
        self
    }

    /// The identifier the heading has, or the one it would get from its
    /// preceding sibling's `name` (dots become hyphens).
    pub fn resolved_identifier(&self) -> Option<Cow<'_, str>> {
        match self.identifier.as_deref() {
            Some(id) if !id.is_empty() => Some(Cow::Borrowed(id)),
            _ => self
                .sibling_name
                .as_deref()
                .filter(|name| !name.is_empty())
                .map(|name| Cow::Owned(name.replace('.', "-"))),
        }
    }
}

/// A heading that takes part in the outline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibleHeading<'a> {
    /// Position of the heading in the input sequence
    pub index: usize,
    pub level: HeadingLevel,
    pub identifier: String,
    /// The identifier came from the preceding sibling and must be assigned
    pub derived: bool,
    pub content: &'a str,
}

/// Headings matched by `selector` that have, or can derive, an identifier
pub fn select_eligible<'a>(
    headings: &'a [HeadingNode],
    selector: &HeaderSelector,
) -> Vec<EligibleHeading<'a>> {
    headings
        .iter()
        .enumerate()
        .filter(|(_, heading)| selector.contains(heading.level))
        .filter_map(|(index, heading)| {
            let identifier = heading.resolved_identifier()?;
            let derived = matches!(identifier, Cow::Owned(_));
            Some(EligibleHeading {
                index,
                level: heading.level,
                identifier: identifier.into_owned(),
                derived,
                content: heading.content.as_str(),
            })
        })
        .collect()
}
