use std::path::PathBuf;

/// Default source directory
pub fn default_source() -> PathBuf {
    PathBuf::from(".")
}

/// Default destination directory
pub fn default_destination() -> PathBuf {
    PathBuf::from("_site")
}

/// Extensions of rendered pages
pub fn default_extensions() -> Vec<String> {
    vec!["html".to_string(), "htm".to_string()]
}

/// Prefix of every class added to the outline and the headings
pub fn default_class_prefix() -> String {
    "jekyll-toc".to_string()
}
