//! Constants used throughout templet

/// Configuration file names in order of preference
pub const CONFIG_FILENAMES: &[&str] = &["templet.json", "templet.yaml", "templet.yml"];

/// Extensions collected when the configuration does not name any
pub const DEFAULT_EXTENSIONS: &[&str] = &[".html", ".tmpl"];

/// Mode names accepted by `TemplateMode::from_str`
pub mod mode {
    pub const HTML: &str = "html";
    pub const TEXT: &str = "text";
}
