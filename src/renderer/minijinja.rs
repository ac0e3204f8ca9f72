use crate::{
    error::{Error, Result},
    ext::PathExt,
    renderer::{helpers::HelperFunctions, interface::Templater},
    template::TemplateMode,
};
use log::{debug, info};
use minijinja::{Environment, ErrorKind, UndefinedBehavior};
use std::{fs, io::Write, path::PathBuf};

/// Options shared by both backends when a set is parsed.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Helpers installed as globals before any file is parsed.
    pub helpers: Option<HelperFunctions>,
    /// Fail rendering when the context lacks a referenced field.
    pub strict: bool,
}

/// MiniJinja environment holding every file of a set, keyed by file name.
struct TemplateSet {
    env: Environment<'static>,
    names: Vec<String>,
}

impl TemplateSet {
    fn parse(paths: &[PathBuf], mode: TemplateMode, options: &ParseOptions) -> Result<Self> {
        let mut env = Environment::new();
        let auto_escape = mode.auto_escape();
        env.set_auto_escape_callback(move |_| auto_escape.clone());
        if options.strict {
            env.set_undefined_behavior(UndefinedBehavior::Strict);
        }
        if let Some(helpers) = &options.helpers {
            helpers.install(&mut env);
        }

        let mut names: Vec<String> = Vec::with_capacity(paths.len());
        for path in paths {
            let path_str = path.display().to_string();
            let name = path
                .template_name()
                .map_err(|_| Error::InvalidTemplateName { path: path_str.clone() })?
                .to_string();
            if names.contains(&name) {
                return Err(Error::DuplicateTemplate { name, path: path_str });
            }

            let source = fs::read_to_string(path)
                .map_err(|source| Error::TemplateRead { path: path_str.clone(), source })?;
            env.add_template_owned(name.clone(), source)
                .map_err(|source| Error::TemplateParse { path: path_str, source })?;

            debug!("Parsed template '{name}' from {}", path.display());
            names.push(name);
        }

        info!("Parsed {} {mode} templates: {:?}", names.len(), names);
        Ok(Self { env, names })
    }

    fn execute_template(
        &self,
        w: &mut dyn Write,
        name: &str,
        context: &serde_json::Value,
    ) -> Result<()> {
        let tmpl = self.env.get_template(name).map_err(|source| {
            if source.kind() == ErrorKind::TemplateNotFound {
                Error::TemplateNotFound { name: name.to_string() }
            } else {
                Error::Render { name: name.to_string(), source }
            }
        })?;
        tmpl.render_captured_to(context, w)
            .map_err(|source| Error::Render { name: name.to_string(), source })?;
        Ok(())
    }

    fn execute(&self, w: &mut dyn Write, context: &serde_json::Value) -> Result<()> {
        let name = self
            .names
            .first()
            .ok_or_else(|| Error::TemplateNotFound { name: String::new() })?;
        self.execute_template(w, name, context)
    }
}

/// Template set that HTML-escapes every expression it prints.
pub struct HtmlTemplates {
    set: TemplateSet,
}

impl HtmlTemplates {
    /// Parses `paths` with HTML auto-escaping. All files parse or none do.
    pub fn parse(paths: &[PathBuf], options: &ParseOptions) -> Result<Self> {
        Ok(Self { set: TemplateSet::parse(paths, TemplateMode::Html, options)? })
    }

    /// The underlying MiniJinja environment.
    pub fn environment(&self) -> &Environment<'static> {
        &self.set.env
    }
}

/// Template set that prints expressions verbatim.
pub struct TextTemplates {
    set: TemplateSet,
}

impl TextTemplates {
    /// Parses `paths` without escaping. All files parse or none do.
    pub fn parse(paths: &[PathBuf], options: &ParseOptions) -> Result<Self> {
        Ok(Self { set: TemplateSet::parse(paths, TemplateMode::Text, options)? })
    }

    /// The underlying MiniJinja environment.
    pub fn environment(&self) -> &Environment<'static> {
        &self.set.env
    }
}

impl Templater for HtmlTemplates {
    fn execute(&self, w: &mut dyn Write, context: &serde_json::Value) -> Result<()> {
        self.set.execute(w, context)
    }

    fn execute_template(
        &self,
        w: &mut dyn Write,
        name: &str,
        context: &serde_json::Value,
    ) -> Result<()> {
        self.set.execute_template(w, name, context)
    }

    fn template_names(&self) -> &[String] {
        &self.set.names
    }

    fn mode(&self) -> TemplateMode {
        TemplateMode::Html
    }

    fn as_html(&self) -> Option<&HtmlTemplates> {
        Some(self)
    }
}

impl Templater for TextTemplates {
    fn execute(&self, w: &mut dyn Write, context: &serde_json::Value) -> Result<()> {
        self.set.execute(w, context)
    }

    fn execute_template(
        &self,
        w: &mut dyn Write,
        name: &str,
        context: &serde_json::Value,
    ) -> Result<()> {
        self.set.execute_template(w, name, context)
    }

    fn template_names(&self) -> &[String] {
        &self.set.names
    }

    fn mode(&self) -> TemplateMode {
        TemplateMode::Text
    }

    fn as_text(&self) -> Option<&TextTemplates> {
        Some(self)
    }
}
