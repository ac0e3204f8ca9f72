//! Template set assembly
//!
//! - `mode`: the backend selector
//! - `builder`: walks a root and parses the collected files into a set

pub mod builder;
pub mod mode;

pub use builder::{parse_recursive, parse_recursive_with_mode_name, TemplateSetBuilder};
pub use mode::TemplateMode;
