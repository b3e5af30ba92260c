pub mod values;

// Export the default values
pub use values::*;

/// Default excludes, glob patterns relative to the source directory
pub fn default_exclude() -> Vec<String> {
    vec![
        ".git/**".to_string(),
        "_site/**".to_string(),
        "vendor/**".to_string(),
        "node_modules/**".to_string(),
        ".jekyll-cache/**".to_string(),
        ".sass-cache/**".to_string(),
    ]
}
