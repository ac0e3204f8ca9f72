use crate::{
    collector::collect_paths,
    constants::DEFAULT_EXTENSIONS,
    error::{Error, Result},
    renderer::{HelperFunctions, HtmlTemplates, ParseOptions, Templater, TextTemplates},
    template::TemplateMode,
};
use log::debug;
use std::path::{Path, PathBuf};

/// Collects template files under a root and parses them into one set.
///
/// ```no_run
/// use templet::renderer::HelperFunctions;
/// use templet::template::{TemplateMode, TemplateSetBuilder};
///
/// let set = TemplateSetBuilder::new("views")
///     .mode(TemplateMode::Text)
///     .extensions([".tmpl"])
///     .helpers(HelperFunctions::new())
///     .build()?;
/// # Ok::<(), templet::error::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct TemplateSetBuilder {
    root: PathBuf,
    mode: TemplateMode,
    extensions: Vec<String>,
    options: ParseOptions,
}

impl TemplateSetBuilder {
    /// HTML mode, `.html` and `.tmpl` files, strict undefined, no helpers.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            mode: TemplateMode::Html,
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
            options: ParseOptions { helpers: None, strict: true },
        }
    }

    pub fn mode(mut self, mode: TemplateMode) -> Self {
        self.mode = mode;
        self
    }

    /// Extensions to collect, each with its leading dot.
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn helpers(mut self, helpers: HelperFunctions) -> Self {
        self.options.helpers = Some(helpers);
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.options.strict = strict;
        self
    }

    /// Walks the root and parses every collected file.
    ///
    /// # Returns
    /// * `Result<Box<dyn Templater>>` - The parsed set, or the first parse
    ///   failure. `Error::NoTemplateFiles` when nothing matched.
    pub fn build(&self) -> Result<Box<dyn Templater>> {
        let paths = collect_paths(&self.root, &self.extensions);
        self.parse_files(&paths)
    }

    /// Parses `paths` as one set with this builder's mode and options,
    /// without walking the root.
    pub fn parse_files(&self, paths: &[PathBuf]) -> Result<Box<dyn Templater>> {
        if paths.is_empty() {
            return Err(Error::NoTemplateFiles { root: self.root.display().to_string() });
        }
        debug!("Parsing {} files in {} mode", paths.len(), self.mode);

        let set: Box<dyn Templater> = match self.mode {
            TemplateMode::Html => Box::new(HtmlTemplates::parse(paths, &self.options)?),
            TemplateMode::Text => Box::new(TextTemplates::parse(paths, &self.options)?),
        };
        Ok(set)
    }
}

/// Collects every file under `root` whose extension is in `extensions` and
/// parses them as a single set with the backend `mode` selects.
///
/// No helpers are installed; use [`TemplateSetBuilder::helpers`] for that.
///
/// # Arguments
/// * `root` - Directory to walk; a missing root collects nothing
/// * `mode` - HTML-escaping or plain text backend
/// * `extensions` - Extensions to keep, with their leading dot (".html")
pub fn parse_recursive<P, S>(
    root: P,
    mode: TemplateMode,
    extensions: &[S],
) -> Result<Box<dyn Templater>>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    TemplateSetBuilder::new(root)
        .mode(mode)
        .extensions(extensions.iter().map(|ext| ext.as_ref().to_string()))
        .build()
}

/// Same as [`parse_recursive`] with the mode given by name (`"html"` or
/// `"text"`). An unknown name fails with `Error::UnsupportedMode` before the
/// root is touched.
pub fn parse_recursive_with_mode_name<P, S>(
    root: P,
    mode: &str,
    extensions: &[S],
) -> Result<Box<dyn Templater>>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    let mode: TemplateMode = mode.parse()?;
    parse_recursive(root, mode, extensions)
}
