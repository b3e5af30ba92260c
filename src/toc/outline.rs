use serde::Serialize;

use crate::config::{LevelJumps, ListType};
use crate::toc::encode::fragment_href;
use crate::toc::heading::HeadingLevel;
use crate::utils::text::strip_tags;

/// One heading's place in the outline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineEntry {
    pub level: HeadingLevel,
    pub identifier: String,
    /// Heading inner markup, used verbatim as link text
    pub content: String,
}

impl OutlineEntry {
    pub fn new(level: HeadingLevel, identifier: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            level,
            identifier: identifier.into(),
            content: content.into(),
        }
    }
}

/// A list item of the outline.
///
/// Items without an entry are placeholders opened for skipped levels
/// (an `h2` followed directly by an `h4` nests the `h4` two lists deep).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct OutlineItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<OutlineEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<OutlineItem>,
}

impl OutlineItem {
    fn placeholder() -> Self {
        Self::default()
    }

    fn entry(entry: OutlineEntry) -> Self {
        Self {
            entry: Some(entry),
            children: Vec::new(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.entry.is_none()
    }

    fn depth(&self) -> usize {
        1 + self.children.iter().map(OutlineItem::depth).max().unwrap_or(0)
    }

    fn collect_entries<'a>(&'a self, out: &mut Vec<&'a OutlineEntry>) {
        if let Some(entry) = &self.entry {
            out.push(entry);
        }
        for child in &self.children {
            child.collect_entries(out);
        }
    }

    fn write_html(&self, html: &mut String, list_tag: &str) {
        html.push_str("<li>");
        if let Some(entry) = &self.entry {
            html.push_str(&format!(
                "<a href=\"{}\">{}</a>",
                fragment_href(&entry.identifier),
                entry.content
            ));
        }
        if !self.children.is_empty() {
            html.push_str(&format!("<{}>", list_tag));
            for child in &self.children {
                child.write_html(html, list_tag);
            }
            html.push_str(&format!("</{}>", list_tag));
        }
        html.push_str("</li>");
    }

    fn write_markdown(&self, md: &mut String, indent: usize) {
        let spaces = "  ".repeat(indent);
        match &self.entry {
            Some(entry) => md.push_str(&format!(
                "{}* [{}]({})\n",
                spaces,
                escape_link_text(&strip_tags(&entry.content)),
                fragment_href(&entry.identifier)
            )),
            None => md.push_str(&format!("{}*\n", spaces)),
        }
        for child in &self.children {
            child.write_markdown(md, indent + 1);
        }
    }
}

/// The nested outline of a document's headings
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Outline {
    pub items: Vec<OutlineItem>,
}

impl Outline {
    /// Build the outline from entries in document order.
    ///
    /// With [`LevelJumps::Preserve`] each entry moves as many lists deeper or
    /// shallower as its level differs from the previous entry's; moving
    /// shallower than the first list stops at the first list.
    /// [`LevelJumps::Normalize`] nests each entry under the closest preceding
    /// entry of a smaller level instead.
    pub fn build<I>(entries: I, level_jumps: LevelJumps) -> Self
    where
        I: IntoIterator<Item = OutlineEntry>,
    {
        let entries: Vec<OutlineEntry> = entries.into_iter().collect();
        let levels: Vec<HeadingLevel> = entries.iter().map(|entry| entry.level).collect();
        let depths = match level_jumps {
            LevelJumps::Preserve => raw_depths(&levels),
            LevelJumps::Normalize => normalized_depths(&levels),
        };

        // Open lists, outermost first; the last item of each list is the open item
        let mut stack: Vec<Vec<OutlineItem>> = vec![Vec::new()];

        for (entry, depth) in entries.into_iter().zip(depths) {
            while stack.len() > depth + 1 {
                close_innermost(&mut stack);
            }

            while stack.len() < depth + 1 {
                if let Some(list) = stack.last_mut() {
                    if list.is_empty() {
                        list.push(OutlineItem::placeholder());
                    }
                }
                stack.push(Vec::new());
                if stack.len() < depth + 1 {
                    if let Some(list) = stack.last_mut() {
                        list.push(OutlineItem::placeholder());
                    }
                }
            }

            if let Some(list) = stack.last_mut() {
                list.push(OutlineItem::entry(entry));
            }
        }

        while stack.len() > 1 {
            close_innermost(&mut stack);
        }

        Self {
            items: stack.pop().unwrap_or_default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Entries in document order
    pub fn entries(&self) -> Vec<&OutlineEntry> {
        let mut entries = Vec::new();
        for item in &self.items {
            item.collect_entries(&mut entries);
        }
        entries
    }

    /// Number of nested lists on the deepest path
    pub fn depth(&self) -> usize {
        self.items.iter().map(OutlineItem::depth).max().unwrap_or(0)
    }

    /// Render as the outline markup: `title`, then one list of links per level
    pub fn to_html(&self, title: &str, list_type: ListType, list_class: &str) -> String {
        let tag = list_type.tag_name();
        let mut html = String::new();

        if !title.is_empty() {
            html.push_str(title);
            html.push(' ');
        }

        html.push_str(&format!(
            "<{} class=\"{}\">",
            tag,
            html_escape::encode_double_quoted_attribute(list_class)
        ));
        for item in &self.items {
            item.write_html(&mut html, tag);
        }
        html.push_str(&format!("</{}>", tag));
        html
    }

    /// Render as a nested markdown list of links
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();
        for item in &self.items {
            item.write_markdown(&mut md, 0);
        }
        md
    }
}

/// Backslash-escape the characters that end or break a markdown link label
fn escape_link_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '[' | ']') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Attach the innermost open list to the open item of its parent list
fn close_innermost(stack: &mut Vec<Vec<OutlineItem>>) {
    if let Some(children) = stack.pop() {
        if let Some(parent) = stack.last_mut().and_then(|list| list.last_mut()) {
            parent.children.extend(children);
        }
    }
}

fn raw_depths(levels: &[HeadingLevel]) -> Vec<usize> {
    let mut depths = Vec::with_capacity(levels.len());
    let mut depth = 0usize;
    let mut current = match levels.first() {
        Some(level) => level.get(),
        None => return depths,
    };

    for level in levels {
        let this = level.get();
        if this > current {
            depth += usize::from(this - current);
        } else if this < current {
            depth = depth.saturating_sub(usize::from(current - this));
        }
        current = this;
        depths.push(depth);
    }

    depths
}

fn normalized_depths(levels: &[HeadingLevel]) -> Vec<usize> {
    let mut open: Vec<HeadingLevel> = Vec::new();
    levels
        .iter()
        .map(|&level| {
            while open.last().is_some_and(|&top| top >= level) {
                open.pop();
            }
            let depth = open.len();
            open.push(level);
            depth
        })
        .collect()
}
