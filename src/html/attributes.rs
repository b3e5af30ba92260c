use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ATTRIBUTE_REGEX: Regex = Regex::new(
        r#"([^\s"'<>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#
    ).unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quote {
    Double,
    Single,
    Bare,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Attribute {
    name: String,
    /// Value as written in the source, entities still encoded
    raw: Option<String>,
    quote: Quote,
}

/// Attributes of a start tag, kept in source order.
///
/// Values read from the source are written back exactly as they were; only
/// values set through [`Attributes::set`] or [`Attributes::add_class`] are
/// escaped on the way out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    items: Vec<Attribute>,
}

impl Attributes {
    /// Parse the attribute section of a start tag (everything after the tag name)
    pub fn parse(source: &str) -> Self {
        let items = ATTRIBUTE_REGEX
            .captures_iter(source)
            .map(|cap| {
                let (raw, quote) = if let Some(value) = cap.get(2) {
                    (Some(value.as_str().to_string()), Quote::Double)
                } else if let Some(value) = cap.get(3) {
                    (Some(value.as_str().to_string()), Quote::Single)
                } else {
                    (cap.get(4).map(|value| value.as_str().to_string()), Quote::Bare)
                };
                Attribute {
                    name: cap[1].to_ascii_lowercase(),
                    raw,
                    quote,
                }
            })
            .collect();

        Self { items }
    }

    fn find(&self, name: &str) -> Option<&Attribute> {
        self.items.iter().find(|attr| attr.name.eq_ignore_ascii_case(name))
    }

    /// Decoded value of an attribute; `Some("")` for a valueless attribute
    pub fn get(&self, name: &str) -> Option<Cow<'_, str>> {
        self.find(name).map(|attr| match &attr.raw {
            Some(raw) => html_escape::decode_html_entities(raw),
            None => Cow::Borrowed(""),
        })
    }

    /// Set an attribute to a plain-text value, replacing any previous value
    pub fn set(&mut self, name: &str, value: &str) {
        let raw = html_escape::encode_double_quoted_attribute(value).into_owned();
        match self.items.iter_mut().find(|attr| attr.name.eq_ignore_ascii_case(name)) {
            Some(attr) => {
                attr.raw = Some(raw);
                attr.quote = Quote::Double;
            }
            None => self.items.push(Attribute {
                name: name.to_ascii_lowercase(),
                raw: Some(raw),
                quote: Quote::Double,
            }),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get("class")
            .map(|classes| classes.split_ascii_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Add a class token unless it is already present
    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }

        let encoded = html_escape::encode_double_quoted_attribute(class);
        match self.items.iter_mut().find(|attr| attr.name == "class") {
            Some(attr) => {
                let existing = attr.raw.take().unwrap_or_default();
                let joined = if existing.trim().is_empty() {
                    encoded.into_owned()
                } else {
                    format!("{} {}", existing.trim_end(), encoded)
                };
                // a single quoted value may hold a literal `"`; keep its quoting
                if attr.quote == Quote::Bare {
                    attr.quote = Quote::Double;
                }
                attr.raw = Some(joined);
            }
            None => self.items.push(Attribute {
                name: "class".to_string(),
                raw: Some(encoded.into_owned()),
                quote: Quote::Double,
            }),
        }
    }

    /// Serialize back to start tag form, each attribute preceded by a space
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for attr in &self.items {
            html.push(' ');
            html.push_str(&attr.name);
            if let Some(raw) = &attr.raw {
                match attr.quote {
                    Quote::Double | Quote::Bare => {
                        html.push_str("=\"");
                        html.push_str(raw);
                        html.push('"');
                    }
                    Quote::Single => {
                        html.push_str("='");
                        html.push_str(raw);
                        html.push('\'');
                    }
                }
            }
        }
        html
    }
}
