use crate::constants::mode;
use crate::error::{Error, Result};
use minijinja::AutoEscape;
use std::fmt;
use std::str::FromStr;

/// Selects the backend a template set is parsed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateMode {
    /// Markup-safe output: printed expressions are HTML-escaped.
    Html,
    /// Plain text output: printed expressions are written as-is.
    Text,
}

impl TemplateMode {
    pub fn auto_escape(self) -> AutoEscape {
        match self {
            TemplateMode::Html => AutoEscape::Html,
            TemplateMode::Text => AutoEscape::None,
        }
    }
}

impl fmt::Display for TemplateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateMode::Html => f.write_str(mode::HTML),
            TemplateMode::Text => f.write_str(mode::TEXT),
        }
    }
}

impl FromStr for TemplateMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case(mode::HTML) {
            Ok(TemplateMode::Html)
        } else if s.eq_ignore_ascii_case(mode::TEXT) {
            Ok(TemplateMode::Text)
        } else {
            Err(Error::UnsupportedMode { mode: s.to_string() })
        }
    }
}

/// `0` is HTML and `1` is text; anything else is unsupported.
impl TryFrom<i64> for TemplateMode {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            0 => Ok(TemplateMode::Html),
            1 => Ok(TemplateMode::Text),
            other => Err(Error::UnsupportedMode { mode: other.to_string() }),
        }
    }
}
