mod defaults;
mod loader;
mod selector;
mod types;
mod validation;

pub use loader::load_config;
pub use selector::{ContainerSelector, HeaderSelector};
pub use types::*;
pub use validation::{validate_config, validate_toc_config};
