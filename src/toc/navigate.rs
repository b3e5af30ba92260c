//! Same-page navigation.
//!
//! Browsers only report a fragment change when the new value differs from the
//! current one, so clicking a link to the heading you are already on would do
//! nothing. [`force_navigate`] clears the fragment first in that case.

/// The fragment part of the current page location, without the leading `#`
pub trait Location {
    fn fragment(&self) -> &str;

    fn set_fragment(&mut self, fragment: &str);
}

/// Navigate to `fragment`, producing a change even if it is already current
pub fn force_navigate<L: Location + ?Sized>(location: &mut L, fragment: &str) {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    if location.fragment() == fragment {
        location.set_fragment("");
    }
    location.set_fragment(fragment);
}

/// In-memory location that records every observable fragment change
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryLocation {
    fragment: String,
    changes: Vec<String>,
}

impl MemoryLocation {
    pub fn new(fragment: impl Into<String>) -> Self {
        Self {
            fragment: fragment.into(),
            changes: Vec::new(),
        }
    }

    /// Fragment values in the order they became current
    pub fn changes(&self) -> &[String] {
        &self.changes
    }
}

impl Location for MemoryLocation {
    fn fragment(&self) -> &str {
        &self.fragment
    }

    fn set_fragment(&mut self, fragment: &str) {
        if self.fragment != fragment {
            self.fragment = fragment.to_string();
            self.changes.push(self.fragment.clone());
        }
    }
}
