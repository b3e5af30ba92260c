use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TAG_REGEX: Regex = Regex::new(r"<[^>]*>").unwrap();
    static ref WHITESPACE_REGEX: Regex = Regex::new(r"\s+").unwrap();
}

/// Plain text of an inline markup fragment: tags removed, entities decoded,
/// whitespace collapsed
pub fn strip_tags(markup: &str) -> String {
    let without_tags = TAG_REGEX.replace_all(markup, "");
    let decoded = html_escape::decode_html_entities(&without_tags);
    WHITESPACE_REGEX.replace_all(decoded.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("<code>Vec&lt;T&gt;</code> basics"), "Vec<T> basics");
        assert_eq!(strip_tags("  Multi\n   line <em>title</em> "), "Multi line title");
        assert_eq!(strip_tags("plain"), "plain");
    }
}
