use std::ops::Range;

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::ContainerSelector;
use crate::html::attributes::Attributes;
use crate::toc::{HeadingLevel, HeadingNode};

lazy_static! {
    static ref HEADING_OPEN_REGEX: Regex = Regex::new(r"(?i)<(h[1-6])(\s[^>]*)?>").unwrap();
    static ref HEADING_CLOSE_REGEX: Regex = Regex::new(r"(?i)</(h[1-6])\s*>").unwrap();
    static ref START_TAG_REGEX: Regex =
        Regex::new(r"<([a-zA-Z][a-zA-Z0-9:-]*)(\s[^>]*)?>").unwrap();
    static ref ANY_TAG_REGEX: Regex = Regex::new(r"</?([a-zA-Z][a-zA-Z0-9:-]*)(?:\s[^>]*)?>").unwrap();
    static ref COMMENT_REGEX: Regex = Regex::new(r"(?s)<!--.*?(?:-->|\z)").unwrap();
    static ref RAW_TEXT_REGEXES: Vec<Regex> = ["script", "style", "template", "textarea"]
        .iter()
        .map(|tag| {
            Regex::new(&format!(r"(?is)<{0}\b[^>]*>.*?(?:</{0}\s*>|\z)", tag)).unwrap()
        })
        .collect();
}

/// Elements that never have content or an end tag
const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|void| void.eq_ignore_ascii_case(tag))
}

/// A heading element found in a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingElement {
    /// Byte range of the whole element, start tag to end tag
    pub span: Range<usize>,
    /// Byte range of the inner markup
    pub content: Range<usize>,
    /// Tag name as written (`h2`, `H2`)
    pub tag: String,
    pub level: HeadingLevel,
    pub attributes: Attributes,
    /// `name` attribute of the preceding sibling element
    pub sibling_name: Option<String>,
}

/// An element whose content receives the outline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerElement {
    pub span: Range<usize>,
    pub content: Range<usize>,
}

/// A rendered HTML page and the elements the TOC run cares about
#[derive(Debug, Clone)]
pub struct Document<'a> {
    source: &'a str,
    headings: Vec<HeadingElement>,
    /// Comments and raw text elements; markup inside them is not part of the page
    opaque: Vec<Range<usize>>,
}

impl<'a> Document<'a> {
    /// Scan `source` for heading elements
    pub fn parse(source: &'a str) -> Self {
        let opaque = opaque_ranges(source);
        let headings = scan_headings(source, &opaque);
        Self {
            source,
            headings,
            opaque,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn headings(&self) -> &[HeadingElement] {
        &self.headings
    }

    /// Inner markup of a heading
    pub fn heading_content(&self, heading: &HeadingElement) -> &'a str {
        &self.source[heading.content.clone()]
    }

    /// Headings as builder input, index for index with [`Document::headings`]
    pub fn heading_nodes(&self) -> Vec<HeadingNode> {
        self.headings
            .iter()
            .map(|heading| HeadingNode {
                level: heading.level,
                identifier: heading.attributes.get("id").map(|id| id.into_owned()),
                sibling_name: heading.sibling_name.clone(),
                content: self.heading_content(heading).to_string(),
            })
            .collect()
    }

    /// Every element matching `selector`, outermost matches only
    pub fn containers(&self, selector: &ContainerSelector) -> Vec<ContainerElement> {
        let mut containers: Vec<ContainerElement> = Vec::new();

        for cap in START_TAG_REGEX.captures_iter(self.source) {
            let whole = match cap.get(0) {
                Some(m) => m,
                None => continue,
            };
            if containers.iter().any(|c| c.span.contains(&whole.start()))
                || is_opaque(&self.opaque, whole.start())
            {
                continue;
            }

            let tag = &cap[1];
            if whole.as_str().ends_with("/>") || is_void(tag) {
                continue;
            }

            let attributes = Attributes::parse(cap.get(2).map_or("", |m| m.as_str()));
            let matches = match selector {
                ContainerSelector::Class(class) => attributes.has_class(class),
                ContainerSelector::Id(id) => attributes.get("id").as_deref() == Some(id.as_str()),
                ContainerSelector::Tag(name) => tag.eq_ignore_ascii_case(name),
            };
            if !matches {
                continue;
            }

            if let Some(close) = find_end_tag(self.source, tag, whole.end(), &self.opaque) {
                containers.push(ContainerElement {
                    span: whole.start()..close.end,
                    content: whole.end()..close.start,
                });
            }
        }

        containers
    }
}

/// Byte ranges of comments and of `script`, `style`, `template` and
/// `textarea` elements, sorted by start
fn opaque_ranges(source: &str) -> Vec<Range<usize>> {
    let mut ranges: Vec<Range<usize>> = COMMENT_REGEX
        .find_iter(source)
        .map(|m| m.range())
        .collect();

    for regex in RAW_TEXT_REGEXES.iter() {
        for m in regex.find_iter(source) {
            if !is_opaque(&ranges, m.start()) {
                ranges.push(m.range());
            }
        }
    }

    ranges.sort_by_key(|range| range.start);
    ranges
}

fn is_opaque(ranges: &[Range<usize>], position: usize) -> bool {
    ranges.iter().any(|range| range.contains(&position))
}

fn scan_headings(source: &str, opaque: &[Range<usize>]) -> Vec<HeadingElement> {
    let mut headings = Vec::new();
    let mut resume_at = 0;

    for cap in HEADING_OPEN_REGEX.captures_iter(source) {
        let open = match cap.get(0) {
            Some(m) => m,
            None => continue,
        };
        if open.start() < resume_at || is_opaque(opaque, open.start()) {
            continue;
        }

        let tag = cap[1].to_string();
        let level = match HeadingLevel::from_tag_name(&tag) {
            Some(level) => level,
            None => continue,
        };

        let close = HEADING_CLOSE_REGEX
            .captures_iter(&source[open.end()..])
            .filter_map(|close| close.get(0).map(|m| (close[1].to_string(), m)))
            .filter(|(_, m)| !is_opaque(opaque, open.end() + m.start()))
            .find(|(name, _)| name.eq_ignore_ascii_case(&tag))
            .map(|(_, m)| (open.end() + m.start())..(open.end() + m.end()));

        let close = match close {
            Some(range) => range,
            None => continue,
        };

        headings.push(HeadingElement {
            span: open.start()..close.end,
            content: open.end()..close.start,
            tag,
            level,
            attributes: Attributes::parse(cap.get(2).map_or("", |m| m.as_str())),
            sibling_name: preceding_sibling_name(source, open.start(), opaque),
        });
        resume_at = close.end;
    }

    headings
}

/// End tag matching a start tag of `tag` that ended at `from`, nesting aware
fn find_end_tag(
    source: &str,
    tag: &str,
    from: usize,
    opaque: &[Range<usize>],
) -> Option<Range<usize>> {
    let mut depth = 0usize;
    for cap in ANY_TAG_REGEX.captures_iter(&source[from..]) {
        let m = cap.get(0)?;
        if !cap[1].eq_ignore_ascii_case(tag)
            || m.as_str().ends_with("/>")
            || is_opaque(opaque, from + m.start())
        {
            continue;
        }
        if m.as_str().starts_with("</") {
            if depth == 0 {
                return Some((from + m.start())..(from + m.end()));
            }
            depth -= 1;
        } else {
            depth += 1;
        }
    }
    None
}

/// Start tag matching the end tag of `tag` that begins at `before`, nesting aware
fn find_start_tag(
    source: &str,
    tag: &str,
    before: usize,
    opaque: &[Range<usize>],
) -> Option<Range<usize>> {
    let mut depth = 0usize;
    let tags: Vec<_> = ANY_TAG_REGEX
        .captures_iter(&source[..before])
        .filter(|cap| cap[1].eq_ignore_ascii_case(tag))
        .filter_map(|cap| cap.get(0).map(|m| (m.start(), m.end(), m.as_str().starts_with("</"))))
        .filter(|(start, _, _)| !is_opaque(opaque, *start))
        .collect();

    for (start, end, closing) in tags.into_iter().rev() {
        if closing {
            depth += 1;
        } else if depth == 0 {
            return Some(start..end);
        } else {
            depth -= 1;
        }
    }
    None
}

/// `name` attribute of the element sibling right before the element at `position`.
///
/// Text and comments between the two are skipped. If the nearest tag is a
/// start tag of a non-void element, that element is the parent and there is
/// no preceding sibling.
fn preceding_sibling_name(source: &str, position: usize, opaque: &[Range<usize>]) -> Option<String> {
    let mut end = position;

    loop {
        let before = &source[..end];
        let tag_end = before.rfind('>')?;

        if let Some(range) = opaque.iter().find(|range| range.contains(&tag_end)) {
            if source[range.start..].starts_with("<!--") {
                end = range.start;
                continue;
            }
            // a script, style, template or textarea element is itself the sibling
            let open_end = range.start + source[range.start..].find('>')?;
            return name_attribute(&source[range.start..=open_end]);
        }

        let tag_start = before[..tag_end].rfind('<')?;
        let tag_text = &before[tag_start..=tag_end];
        let tag_caps = ANY_TAG_REGEX.captures(tag_text)?;
        let name = tag_caps[1].to_string();

        let element_start_tag = if tag_text.starts_with("</") {
            let range = find_start_tag(source, &name, tag_start, opaque)?;
            &source[range]
        } else if tag_text.ends_with("/>") || is_void(&name) {
            tag_text
        } else {
            return None;
        };

        return name_attribute(element_start_tag);
    }
}

fn name_attribute(start_tag: &str) -> Option<String> {
    START_TAG_REGEX
        .captures(start_tag)
        .and_then(|cap| cap.get(2).map(|m| Attributes::parse(m.as_str())))
        .unwrap_or_default()
        .get("name")
        .map(|value| value.into_owned())
}
