//! Configuration for template sets
//!
//! - `loader`: `TemplateSetConfig` and its file loading

pub mod loader;


pub use loader::TemplateSetConfig;
