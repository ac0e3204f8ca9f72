/// Defines custom error types.
pub mod error;

/// Constants shared across modules.
pub mod constants;

/// Recursive discovery of template files by extension.
pub mod collector;

/// Template set backends and helper functions.
pub mod renderer;

/// Assembles collected files into a template set.
pub mod template;

/// Configuration handling for template sets.
pub mod config;

/// Extension traits for standard library types.
pub mod ext;

pub use collector::collect_paths;
pub use renderer::{HelperFunctions, Templater};
pub use template::{parse_recursive, TemplateMode, TemplateSetBuilder};
