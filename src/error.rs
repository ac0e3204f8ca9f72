use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config file. Original error: {0}")]
    ConfigParseError(String),

    #[error("Invalid configuration: {0}.")]
    ConfigValidation(String),

    #[error("No configuration file found in '{config_dir}'. Tried: {config_files}.")]
    ConfigNotFound { config_dir: String, config_files: String },

    /// The requested template mode is neither `html` nor `text`.
    #[error("No such template mode: '{mode}'.")]
    UnsupportedMode { mode: String },

    /// The root itself could not be walked (missing, unreadable).
    #[error("Cannot walk template root '{root}'. Original error: {source}")]
    WalkRoot {
        root: String,
        #[source]
        source: walkdir::Error,
    },

    #[error("No template files found under '{root}'.")]
    NoTemplateFiles { root: String },

    #[error("Failed to read template '{path}'. Original error: {source}")]
    TemplateRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse template '{path}'. Original error: {source}")]
    TemplateParse {
        path: String,
        #[source]
        source: minijinja::Error,
    },

    /// The file name cannot serve as a template name (not valid UTF-8).
    #[error("Template file '{path}' has no usable name.")]
    InvalidTemplateName { path: String },

    #[error("Template '{name}' is defined twice, the second time in '{path}'.")]
    DuplicateTemplate { name: String, path: String },

    #[error("Template '{name}' does not exist in the set.")]
    TemplateNotFound { name: String },

    #[error("Failed to render '{name}'. Original error: {source}")]
    Render {
        name: String,
        #[source]
        source: minijinja::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// True for errors raised while reading or parsing the template files.
    pub fn is_parse_failure(&self) -> bool {
        matches!(
            self,
            Error::NoTemplateFiles { .. }
                | Error::TemplateRead { .. }
                | Error::TemplateParse { .. }
                | Error::DuplicateTemplate { .. }
                | Error::InvalidTemplateName { .. }
        )
    }

    /// True for errors raised while executing a parsed set.
    pub fn is_render_failure(&self) -> bool {
        matches!(self, Error::Render { .. } | Error::TemplateNotFound { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigParseError(err.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::ConfigParseError(err.to_string())
    }
}

/// Convenience type alias for Results with templet's Error as the error type.
///
/// # Type Parameters
/// * `T` - The type of the success value
pub type Result<T, E = Error> = std::result::Result<T, E>;
