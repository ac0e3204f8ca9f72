//! Template set backends and the helper function library
//!
//! - `interface`: the `Templater` trait every parsed set implements
//! - `minijinja`: HTML-escaping and plain-text sets backed by MiniJinja
//! - `helpers`: string, inflection and arithmetic helpers

pub mod helpers;
pub mod interface;
pub mod minijinja;

pub use helpers::HelperFunctions;
pub use interface::Templater;
pub use self::minijinja::{HtmlTemplates, ParseOptions, TextTemplates};
