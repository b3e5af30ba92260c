/// Percent-encode an identifier for use as a URL fragment.
///
/// Stricter than `encodeURIComponent`: `!`, `'`, `(`, `)` and `*` are escaped
/// as well, so only ASCII alphanumerics and `-_.~` pass through unchanged.
pub fn encode_fragment(identifier: &str) -> String {
    urlencoding::encode(identifier).into_owned()
}

/// `#` followed by the encoded identifier
pub fn fragment_href(identifier: &str) -> String {
    format!("#{}", encode_fragment(identifier))
}
